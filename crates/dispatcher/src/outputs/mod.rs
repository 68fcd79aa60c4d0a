//! Output implementations: LogOutput and FileOutput.

mod file;
mod log;

pub use self::file::{FileOutput, FileOutputConfig};
pub use self::log::LogOutput;
