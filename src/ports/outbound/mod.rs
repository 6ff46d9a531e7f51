/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, other projects).
pub mod aggregate_snapshot_provider;
pub mod assets_file_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use aggregate_snapshot_provider::AggregateSnapshotProvider;
pub use assets_file_reader::AssetsFileReader;
pub use formatter::TreeFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
