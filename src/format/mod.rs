//! Tab-delimited dump format: reader and writer.

pub mod reader;
pub mod writer;

pub use reader::{read_csv, DumpReader, ImportReport};
pub use writer::{export_name, DumpWriter};
