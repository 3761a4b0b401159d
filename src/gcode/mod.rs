mod file;
mod parser;
pub mod words;

pub use self::file::GCodeFile;
pub use self::parser::{AxisRange, HEADER, MARKER};
