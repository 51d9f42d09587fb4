#![forbid(unsafe_code)]

pub use context::Context;
pub use error::Error;

pub mod context;
pub mod error;
