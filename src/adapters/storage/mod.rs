//! Text resource storage. Implements FileSource for local files and S3.

pub mod source_reader;

pub use source_reader::SourceReader;
