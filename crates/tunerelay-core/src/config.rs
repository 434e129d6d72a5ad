use std::time::Duration;

/// Timing policy and thread naming for one relay.
///
/// The defaults mirror the budgets the execution thread is expected to live
/// within in production; tests shrink them instead of sleeping for seconds.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// A command that completes slower than this is logged as a warning.
    pub warn_after: Duration,
    /// Hard completion budget for a tune command; exceeding it is fatal to
    /// the relay.
    pub tune_budget: Duration,
    /// Hard completion budget for every other command kind.
    pub command_budget: Duration,
    pub thread_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            warn_after: Duration::from_millis(50),
            tune_budget: Duration::from_millis(2000),
            command_budget: Duration::from_millis(5000),
            thread_name: "tunerelay-session".to_string(),
        }
    }
}
