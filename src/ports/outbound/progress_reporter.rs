/// ProgressReporter port for user-facing status lines
///
/// Status goes to stderr so stdout stays clean for the report itself.
/// Diagnostics for developers go through `tracing` instead.
pub trait ProgressReporter {
    /// Reports a status line, e.g. which assets file is being loaded
    fn report(&self, message: &str);

    /// Reports progress through a sequence of targets or projects
    ///
    /// # Arguments
    /// * `current` - 1-based index of the item being processed
    /// * `total` - Number of items
    /// * `item` - Optional name of the current item
    fn report_progress(&self, current: usize, total: usize, item: Option<&str>);

    /// Reports a non-fatal problem the user should know about
    fn report_warning(&self, message: &str);

    /// Reports that the command finished
    fn report_completion(&self, message: &str);
}
