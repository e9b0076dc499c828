/// Filesystem adapters for reading SBOMs and writing command output
mod file_reader;
mod file_writer;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter, STDOUT_PATH};
