#![deny(clippy::wildcard_imports)]

mod budget;
mod executor;
mod handle;
mod proxy;
mod queue;
mod receiver;


pub use budget::BudgetExceeded;
pub use executor::{RelayExit, RelayMonitor, start_playback_relay, start_recording_relay};
pub use proxy::{PlaybackProxy, RecordingProxy};

pub use tunerelay_core::command::{PlaybackCommand, RecordingCommand, RelayCommand};
pub use tunerelay_core::config::RelayConfig;
pub use tunerelay_core::input::{
    EventAck, EventReceipt, InputChannel, InputEvent, InputEventKind, InputEventSender,
    input_channel,
};
pub use tunerelay_core::session::{InputDisposition, PlaybackSession, RecordingSession};
pub use tunerelay_core::types::{
    AudioFallback, ParamMap, PlaybackParams, Rect, SurfaceHandle, WindowToken,
};
