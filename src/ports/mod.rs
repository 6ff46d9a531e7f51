/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the CLI drives the use cases
/// directly, and the use cases reach the file system, the console and
/// other projects' snapshots through these traits.
pub mod outbound;
