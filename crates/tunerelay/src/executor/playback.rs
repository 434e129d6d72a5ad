use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, warn};
use tunerelay_core::command::{PlaybackCommand, RelayCommand};
use tunerelay_core::input::InputEvent;
use tunerelay_core::session::PlaybackSession;

use crate::budget::{BudgetExceeded, BudgetVerdict, assess};
use crate::executor::main_loop::RelayTarget;
use crate::handle::RelayState;
use crate::receiver::EventReceiver;

pub(crate) type PlaybackState = RelayState<dyn PlaybackSession>;

pub(crate) struct PlaybackTarget {
    state: Arc<PlaybackState>,
    receiver: Option<EventReceiver>,
}

impl PlaybackTarget {
    pub(crate) fn new(state: Arc<PlaybackState>, receiver: Option<EventReceiver>) -> Self {
        Self { state, receiver }
    }
}

impl RelayTarget for PlaybackTarget {
    type Command = PlaybackCommand;

    fn execute(&mut self, command: PlaybackCommand) {
        execute_playback(&self.state, command);
    }

    fn handle_input(&mut self, event: InputEvent) {
        if let Some(receiver) = &self.receiver {
            receiver.on_input_event(self.state.session(), event);
        }
    }

    fn released(&self) -> bool {
        self.state.is_inert()
    }

    fn fatal(&self) -> Option<BudgetExceeded> {
        self.state.fatal()
    }

    fn dispose(&mut self) {
        self.receiver = None;
    }
}

/// Runs one command and applies the timing policy to it.
///
/// Shared by the queue consumer and the inline re-entrant path; both run on
/// the execution thread, so command execution stays strictly serial.
pub(crate) fn execute_playback(state: &PlaybackState, command: PlaybackCommand) {
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

fn run(state: &PlaybackState, command: PlaybackCommand) {
    let Some(session) = state.session() else {
        if matches!(command, PlaybackCommand::Release) {
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
        PlaybackCommand::Release => {
            session.release();
            state.set_inert();
        },
        PlaybackCommand::SetMain { is_main } => session.set_main(is_main),
        PlaybackCommand::SetSurface { surface } => session.set_surface(surface),
        PlaybackCommand::DispatchSurfaceChanged {
            format,
            width,
            height,
        } => session.dispatch_surface_changed(format, width, height),
        PlaybackCommand::SetStreamVolume { volume } => session.set_stream_volume(volume),
        PlaybackCommand::Tune { uri, params } => session.tune(uri, params),
        PlaybackCommand::SetCaptionEnabled { enabled } => session.set_caption_enabled(enabled),
        PlaybackCommand::SelectTrack {
            track_type,
            track_id,
        } => session.select_track(track_type, track_id),
        PlaybackCommand::AppPrivateCommand { action, data } => {
            session.app_private_command(action, data)
        },
        PlaybackCommand::CreateOverlayView {
            window_token,
            frame,
        } => session.create_overlay_view(window_token, frame),
        PlaybackCommand::RelayoutOverlayView { frame } => session.relayout_overlay_view(frame),
        PlaybackCommand::RemoveOverlayView => session.remove_overlay_view(),
        PlaybackCommand::UnblockContent { rating } => session.unblock_content(rating),
        PlaybackCommand::TimeShiftPlay { uri } => session.time_shift_play(uri),
        PlaybackCommand::TimeShiftPause => session.time_shift_pause(),
        PlaybackCommand::TimeShiftResume => session.time_shift_resume(),
        PlaybackCommand::TimeShiftSeekTo { time_ms } => session.time_shift_seek_to(time_ms),
        PlaybackCommand::TimeShiftSetPlaybackParams { params } => {
            session.time_shift_set_playback_params(params)
        },
        PlaybackCommand::TimeShiftEnablePositionTracking { enable } => {
            session.time_shift_enable_position_tracking(enable)
        },
    }
}
