use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, warn};
use tunerelay_core::command::{RecordingCommand, RelayCommand};
use tunerelay_core::input::InputEvent;
use tunerelay_core::session::RecordingSession;

use crate::budget::{BudgetExceeded, BudgetVerdict, assess};
use crate::executor::main_loop::RelayTarget;
use crate::handle::RelayState;

pub(crate) type RecordingState = RelayState<dyn RecordingSession>;

/// Recording relays share the loop machinery but never bind an event
/// receiver; their event source is the never-ready channel.
pub(crate) struct RecordingTarget {
    state: Arc<RecordingState>,
}

impl RecordingTarget {
    pub(crate) fn new(state: Arc<RecordingState>) -> Self {
        Self { state }
    }
}

impl RelayTarget for RecordingTarget {
    type Command = RecordingCommand;

    fn execute(&mut self, command: RecordingCommand) {
        execute_recording(&self.state, command);
    }

    fn handle_input(&mut self, event: InputEvent) {
        debug!(seq = event.seq, "ignoring input event for recording relay");
    }

    fn released(&self) -> bool {
        self.state.is_inert()
    }

    fn fatal(&self) -> Option<BudgetExceeded> {
        self.state.fatal()
    }

    fn dispose(&mut self) {}
}

pub(crate) fn execute_recording(state: &RecordingState, command: RecordingCommand) {
    let label = command.label();
    let hard_budget = command.hard_budget(&state.config);
    let started = Instant::now();
    run(state, command);
    let elapsed = started.elapsed();
    match assess(label, elapsed, state.config.warn_after, hard_budget) {
        BudgetVerdict::Within => {},
        BudgetVerdict::Slow => {
            warn!(
                command = label,
                elapsed_ms = elapsed.as_millis() as u64,
                "command took too long"
            );
        },
        BudgetVerdict::Exceeded(violation) => {
            error!(
                command = label,
                elapsed_ms = violation.elapsed_ms,
                budget_ms = violation.budget_ms,
                "command exceeded its hard budget"
            );
            state.poison(violation);
        },
    }
}

fn run(state: &RecordingState, command: RecordingCommand) {
    let Some(session) = state.session() else {
        if matches!(command, RecordingCommand::Release) {
            debug!("repeated release for inert session");
        } else {
            warn!(
                command = command.label(),
                "dropping command for inert session"
            );
        }
        return;
    };
    match command {
        RecordingCommand::Release => {
            session.release();
            state.set_inert();
        },
        RecordingCommand::Tune { uri, params } => session.tune(uri, params),
        RecordingCommand::AppPrivateCommand { action, data } => {
            session.app_private_command(action, data)
        },
        RecordingCommand::StartRecording { program_uri } => session.start_recording(program_uri),
        RecordingCommand::StopRecording => session.stop_recording(),
    }
}
