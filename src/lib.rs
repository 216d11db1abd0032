// subscout: learnable vocabulary from subtitle files
//
// This is the library root. Each module corresponds to a stage of the
// vocabulary pipeline or to the shell around it.

pub mod config;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod language;
pub mod output;
pub mod session;
pub mod status;
pub mod store;
pub mod subtitle;
pub mod tokenize;

pub use error::{Result, SubscoutError};
