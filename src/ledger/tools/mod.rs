pub mod classify;
pub mod colorize;
pub mod config;
pub mod error;
pub mod inspect;
pub mod io;
pub mod model;

pub use error::{Result, ToolError};
