use tracing::info;
use tunerelay::{
    EventAck, InputDisposition, InputEvent, InputEventKind, ParamMap, PlaybackParams,
    PlaybackSession, Rect, SurfaceHandle, WindowToken,
};

/// Playback session that only narrates what the relay asks of it.
#[derive(Default)]
pub struct LoggingSession;

impl PlaybackSession for LoggingSession {
    fn release(&self) {
        info!("session released");
    }

    fn set_main(&self, is_main: bool) {
        info!(is_main, "set main");
    }

    fn set_surface(&self, surface: Option<SurfaceHandle>) {
        info!(?surface, "set surface");
    }

    fn dispatch_surface_changed(&self, format: i32, width: i32, height: i32) {
        info!(format, width, height, "surface changed");
    }

    fn set_stream_volume(&self, volume: f32) {
        info!(volume, "set stream volume");
    }

    fn tune(&self, uri: String, params: ParamMap) {
        info!(uri, params = %serde_json::Value::Object(params), "tune");
    }

    fn set_caption_enabled(&self, enabled: bool) {
        info!(enabled, "set caption enabled");
    }

    fn select_track(&self, track_type: i32, track_id: Option<String>) {
        info!(track_type, ?track_id, "select track");
    }

    fn app_private_command(&self, action: String, data: ParamMap) {
        info!(action, data = %serde_json::Value::Object(data), "app private command");
    }

    fn create_overlay_view(&self, window_token: WindowToken, frame: Rect) {
        info!(?window_token, ?frame, "create overlay view");
    }

    fn relayout_overlay_view(&self, frame: Rect) {
        info!(?frame, "relayout overlay view");
    }

    fn remove_overlay_view(&self) {
        info!("remove overlay view");
    }

    fn unblock_content(&self, rating: String) {
        info!(rating, "unblock content");
    }

    fn time_shift_play(&self, uri: String) {
        info!(uri, "time shift play");
    }

    fn time_shift_pause(&self) {
        info!("time shift pause");
    }

    fn time_shift_resume(&self) {
        info!("time shift resume");
    }

    fn time_shift_seek_to(&self, time_ms: i64) {
        info!(time_ms, "time shift seek");
    }

    fn time_shift_set_playback_params(&self, params: PlaybackParams) {
        info!(speed = params.speed, pitch = params.pitch, "time shift playback params");
    }

    fn time_shift_enable_position_tracking(&self, enable: bool) {
        info!(enable, "time shift position tracking");
    }

    fn dispatch_input_event(&self, event: InputEvent, _ack: EventAck) -> InputDisposition {
        match event.kind {
            InputEventKind::Key { code, pressed } => {
                info!(seq = event.seq, code, pressed, "key event");
                InputDisposition::Handled
            },
            InputEventKind::Pointer { .. } => InputDisposition::NotHandled,
        }
    }
}
