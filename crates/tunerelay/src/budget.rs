use std::time::Duration;

use thiserror::Error;

/// A command outran its hard completion budget.
///
/// The execution thread is shared with latency-sensitive duties, so this is
/// treated as a defect in the session implementation rather than a
/// recoverable runtime fault; the relay shuts down instead of silently
/// carrying a stuck thread.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handling {command} took {elapsed_ms}ms, over its {budget_ms}ms budget")]
pub struct BudgetExceeded {
    pub command: &'static str,
    pub elapsed_ms: u64,
    pub budget_ms: u64,
}

pub(crate) enum BudgetVerdict {
    Within,
    Slow,
    Exceeded(BudgetExceeded),
}

pub(crate) fn assess(
    command: &'static str,
    elapsed: Duration,
    warn_after: Duration,
    hard_budget: Duration,
) -> BudgetVerdict {
    if elapsed <= warn_after {
        return BudgetVerdict::Within;
    }
    if elapsed > hard_budget {
        return BudgetVerdict::Exceeded(BudgetExceeded {
            command,
            elapsed_ms: elapsed.as_millis() as u64,
            budget_ms: hard_budget.as_millis() as u64,
        });
    }
    BudgetVerdict::Slow
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tunerelay_core::command::{PlaybackCommand, RelayCommand};
    use tunerelay_core::config::RelayConfig;
    use tunerelay_core::types::ParamMap;

    use super::{BudgetVerdict, assess};

    fn assess_default(command: &PlaybackCommand, elapsed_ms: u64) -> BudgetVerdict {
        let config = RelayConfig::default();
        assess(
            command.label(),
            Duration::from_millis(elapsed_ms),
            config.warn_after,
            command.hard_budget(&config),
        )
    }

    fn tune() -> PlaybackCommand {
        PlaybackCommand::Tune {
            uri: "service://channel/1".to_string(),
            params: ParamMap::new(),
        }
    }

    #[test]
    fn fast_commands_pass_silently() {
        assert!(matches!(
            assess_default(&PlaybackCommand::TimeShiftPause, 49),
            BudgetVerdict::Within
        ));
        assert!(matches!(
            assess_default(&PlaybackCommand::TimeShiftPause, 50),
            BudgetVerdict::Within
        ));
    }

    #[test]
    fn just_over_the_soft_threshold_warns_only() {
        assert!(matches!(
            assess_default(&PlaybackCommand::TimeShiftPause, 51),
            BudgetVerdict::Slow
        ));
        assert!(matches!(assess_default(&tune(), 51), BudgetVerdict::Slow));
    }

    #[test]
    fn tune_over_two_seconds_is_fatal() {
        assert!(matches!(assess_default(&tune(), 2000), BudgetVerdict::Slow));
        match assess_default(&tune(), 2001) {
            BudgetVerdict::Exceeded(violation) => {
                assert_eq!(violation.command, "tune");
                assert_eq!(violation.budget_ms, 2000);
                assert_eq!(violation.elapsed_ms, 2001);
            },
            _ => panic!("expected a budget violation"),
        }
    }

    #[test]
    fn other_commands_get_five_seconds() {
        assert!(matches!(
            assess_default(&PlaybackCommand::RemoveOverlayView, 4000),
            BudgetVerdict::Slow
        ));
        assert!(matches!(
            assess_default(&PlaybackCommand::RemoveOverlayView, 5001),
            BudgetVerdict::Exceeded(_)
        ));
    }
}
