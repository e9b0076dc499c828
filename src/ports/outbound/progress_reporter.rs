/// ProgressReporter port for user-facing status output
///
/// Diagnostic detail goes through `tracing`; this port is for the handful of
/// lines a user watches while a command runs (stage messages, the lookup
/// progress bar, warnings and the final summary).
pub trait ProgressReporter {
    /// Reports a stage message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Total number of items
    /// * `message` - Optional message shown next to the counter
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal problem
    fn report_error(&self, message: &str);

    /// Reports completion of a stage
    fn report_completion(&self, message: &str);
}
