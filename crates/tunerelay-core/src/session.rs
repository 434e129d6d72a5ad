use crate::input::{EventAck, InputEvent};
use crate::types::{ParamMap, PlaybackParams, Rect, SurfaceHandle, WindowToken};

/// Outcome of forwarding one input event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Handled,
    NotHandled,
    /// The session kept its `EventAck` clone and will finish it later,
    /// exactly once, possibly from another thread and out of order with
    /// events forwarded after this one.
    Pending,
}

/// Business logic behind a playback relay.
///
/// Every method is invoked on the relay's execution thread (or inline on it
/// for re-entrant calls); methods take `&self` and implementations own their
/// interior mutability.
pub trait PlaybackSession: Send + Sync + 'static {
    fn release(&self);

    /// Pre-teardown hook, invoked on the caller's thread before the release
    /// command is dispatched, so view and overlay resources are let go in a
    /// deterministic order relative to a caller-initiated teardown.
    fn prepare_release(&self) {}

    fn set_main(&self, is_main: bool);

    fn set_surface(&self, surface: Option<SurfaceHandle>);

    fn dispatch_surface_changed(&self, format: i32, width: i32, height: i32);

    fn set_stream_volume(&self, volume: f32);

    fn tune(&self, uri: String, params: ParamMap);

    fn set_caption_enabled(&self, enabled: bool);

    fn select_track(&self, track_type: i32, track_id: Option<String>);

    fn app_private_command(&self, action: String, data: ParamMap);

    fn create_overlay_view(&self, window_token: WindowToken, frame: Rect);

    fn relayout_overlay_view(&self, frame: Rect);

    fn remove_overlay_view(&self);

    fn unblock_content(&self, rating: String);

    fn time_shift_play(&self, uri: String);

    fn time_shift_pause(&self);

    fn time_shift_resume(&self);

    fn time_shift_seek_to(&self, time_ms: i64);

    fn time_shift_set_playback_params(&self, params: PlaybackParams);

    fn time_shift_enable_position_tracking(&self, enable: bool);

    fn dispatch_input_event(&self, event: InputEvent, ack: EventAck) -> InputDisposition;
}

/// Business logic behind a recording relay.
pub trait RecordingSession: Send + Sync + 'static {
    fn release(&self);

    fn tune(&self, uri: String, params: ParamMap);

    fn app_private_command(&self, action: String, data: ParamMap);

    fn start_recording(&self, program_uri: Option<String>);

    fn stop_recording(&self);
}
