/// Mock implementations for testing
mod mock_assets_file_reader;
mod mock_progress_reporter;

pub use mock_assets_file_reader::MockAssetsFileReader;
pub use mock_progress_reporter::MockProgressReporter;
