use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use tunerelay_core::command::{PlaybackCommand, RecordingCommand};
use tunerelay_core::session::{PlaybackSession, RecordingSession};
use tunerelay_core::types::{ParamMap, PlaybackParams, Rect, SurfaceHandle, WindowToken};

use crate::executor::playback::{PlaybackState, execute_playback};
use crate::executor::recording::{RecordingState, execute_recording};
use crate::queue::QueueTx;

/// Caller-facing surface of a playback relay.
///
/// Every method is fire-and-forget and safe to call from any thread. A call
/// made on the execution thread itself runs inline, ahead of anything still
/// queued, with the same latency as a direct invocation; queueing it would
/// leave the thread waiting on itself.
pub struct PlaybackProxy {
    state: Arc<PlaybackState>,
    queue: QueueTx<PlaybackCommand>,
    hook: Weak<dyn PlaybackSession>,
    exec_thread: ThreadId,
}

impl Clone for PlaybackProxy {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            queue: self.queue.clone(),
            hook: Weak::clone(&self.hook),
            exec_thread: self.exec_thread,
        }
    }
}

impl PlaybackProxy {
    pub(crate) fn new(
        state: Arc<PlaybackState>,
        queue: QueueTx<PlaybackCommand>,
        hook: Weak<dyn PlaybackSession>,
        exec_thread: ThreadId,
    ) -> Self {
        Self {
            state,
            queue,
            hook,
            exec_thread,
        }
    }

    /// Tears the session down. The pre-teardown hook runs on the calling
    /// thread before the command is dispatched, so overlay resources are let
    /// go ahead of the release itself; once the slot is inert the hook is a
    /// no-op.
    pub fn release(&self) {
        if let Some(session) = self.hook.upgrade() {
            session.prepare_release();
        }
        self.dispatch(PlaybackCommand::Release);
    }

    pub fn set_main(&self, is_main: bool) {
        self.dispatch(PlaybackCommand::SetMain { is_main });
    }

    pub fn set_surface(&self, surface: Option<SurfaceHandle>) {
        self.dispatch(PlaybackCommand::SetSurface { surface });
    }

    pub fn dispatch_surface_changed(&self, format: i32, width: i32, height: i32) {
        self.dispatch(PlaybackCommand::DispatchSurfaceChanged {
            format,
            width,
            height,
        });
    }

    pub fn set_stream_volume(&self, volume: f32) {
        self.dispatch(PlaybackCommand::SetStreamVolume { volume });
    }

    /// Requests a tune; any tune still pending for this relay is superseded
    /// and discarded before the new request is queued.
    pub fn tune(&self, uri: impl Into<String>, params: ParamMap) {
        self.dispatch(PlaybackCommand::Tune {
            uri: uri.into(),
            params,
        });
    }

    pub fn set_caption_enabled(&self, enabled: bool) {
        self.dispatch(PlaybackCommand::SetCaptionEnabled { enabled });
    }

    pub fn select_track(&self, track_type: i32, track_id: Option<String>) {
        self.dispatch(PlaybackCommand::SelectTrack {
            track_type,
            track_id,
        });
    }

    pub fn app_private_command(&self, action: impl Into<String>, data: ParamMap) {
        self.dispatch(PlaybackCommand::AppPrivateCommand {
            action: action.into(),
            data,
        });
    }

    pub fn create_overlay_view(&self, window_token: WindowToken, frame: Rect) {
        self.dispatch(PlaybackCommand::CreateOverlayView {
            window_token,
            frame,
        });
    }

    pub fn relayout_overlay_view(&self, frame: Rect) {
        self.dispatch(PlaybackCommand::RelayoutOverlayView { frame });
    }

    pub fn remove_overlay_view(&self) {
        self.dispatch(PlaybackCommand::RemoveOverlayView);
    }

    pub fn unblock_content(&self, rating: impl Into<String>) {
        self.dispatch(PlaybackCommand::UnblockContent {
            rating: rating.into(),
        });
    }

    pub fn time_shift_play(&self, uri: impl Into<String>) {
        self.dispatch(PlaybackCommand::TimeShiftPlay { uri: uri.into() });
    }

    pub fn time_shift_pause(&self) {
        self.dispatch(PlaybackCommand::TimeShiftPause);
    }

    pub fn time_shift_resume(&self) {
        self.dispatch(PlaybackCommand::TimeShiftResume);
    }

    pub fn time_shift_seek_to(&self, time_ms: i64) {
        self.dispatch(PlaybackCommand::TimeShiftSeekTo { time_ms });
    }

    pub fn time_shift_set_playback_params(&self, params: PlaybackParams) {
        self.dispatch(PlaybackCommand::TimeShiftSetPlaybackParams { params });
    }

    pub fn time_shift_enable_position_tracking(&self, enable: bool) {
        self.dispatch(PlaybackCommand::TimeShiftEnablePositionTracking { enable });
    }

    fn dispatch(&self, command: PlaybackCommand) {
        if thread::current().id() == self.exec_thread {
            execute_playback(&self.state, command);
        } else {
            self.queue.send(command);
        }
    }
}

/// Caller-facing surface of a recording relay.
///
/// Exposes only the operations valid for the recording variant; there is no
/// way to reach a playback-only operation through this type.
pub struct RecordingProxy {
    state: Arc<RecordingState>,
    queue: QueueTx<RecordingCommand>,
    exec_thread: ThreadId,
}

impl Clone for RecordingProxy {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            queue: self.queue.clone(),
            exec_thread: self.exec_thread,
        }
    }
}

impl RecordingProxy {
    pub(crate) fn new(
        state: Arc<RecordingState>,
        queue: QueueTx<RecordingCommand>,
        exec_thread: ThreadId,
    ) -> Self {
        Self {
            state,
            queue,
            exec_thread,
        }
    }

    pub fn release(&self) {
        self.dispatch(RecordingCommand::Release);
    }

    pub fn tune(&self, uri: impl Into<String>, params: ParamMap) {
        self.dispatch(RecordingCommand::Tune {
            uri: uri.into(),
            params,
        });
    }

    pub fn app_private_command(&self, action: impl Into<String>, data: ParamMap) {
        self.dispatch(RecordingCommand::AppPrivateCommand {
            action: action.into(),
            data,
        });
    }

    pub fn start_recording(&self, program_uri: Option<String>) {
        self.dispatch(RecordingCommand::StartRecording { program_uri });
    }

    pub fn stop_recording(&self) {
        self.dispatch(RecordingCommand::StopRecording);
    }

    fn dispatch(&self, command: RecordingCommand) {
        if thread::current().id() == self.exec_thread {
            execute_recording(&self.state, command);
        } else {
            self.queue.send(command);
        }
    }
}
