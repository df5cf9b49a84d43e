//! Appender implementations

pub mod file;
pub mod stdout;

pub use file::FileAppender;
pub use stdout::StdoutAppender;

pub use crate::core::{Appender, AppenderState};
