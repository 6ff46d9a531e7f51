/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;

pub use file_reader::{assets_path_for_project, resolve_assets_path, FileSystemReader, ASSETS_FILE_NAME};
pub use file_writer::{AtomicFileWriter, StdoutPresenter};
