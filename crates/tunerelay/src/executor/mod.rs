mod main_loop;
pub(crate) mod playback;
pub(crate) mod recording;

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tunerelay_core::config::RelayConfig;
use tunerelay_core::input::InputChannel;
use tunerelay_core::session::{PlaybackSession, RecordingSession};

use crate::budget::BudgetExceeded;
use crate::executor::main_loop::relay_main;
use crate::executor::playback::{PlaybackState, PlaybackTarget};
use crate::executor::recording::{RecordingState, RecordingTarget};
use crate::proxy::{PlaybackProxy, RecordingProxy};
use crate::queue::dispatch_queue;
use crate::receiver::EventReceiver;

/// Why a relay's execution thread stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayExit {
    /// The teardown command ran and the session was released.
    Released,
    /// Every proxy was dropped without a teardown.
    Disconnected,
    /// A command outran its hard budget; process-level escalation is up to
    /// whoever joins the thread.
    BudgetExceeded(BudgetExceeded),
    /// A session operation panicked.
    Panicked,
}

/// Join-side handle to a relay's execution thread.
pub struct RelayMonitor {
    join: JoinHandle<RelayExit>,
}

impl RelayMonitor {
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn thread(&self) -> &thread::Thread {
        self.join.thread()
    }

    /// Blocks until the relay thread exits.
    pub fn join(self) -> RelayExit {
        self.join.join().unwrap_or(RelayExit::Panicked)
    }
}

/// Spawns a playback relay around `session`.
///
/// A transport channel, when supplied, binds an event receiver on the
/// execution thread; recording sessions never get one.
pub fn start_playback_relay<S: PlaybackSession>(
    session: S,
    channel: Option<InputChannel>,
    config: RelayConfig,
) -> io::Result<(PlaybackProxy, RelayMonitor)> {
    let session: Arc<dyn PlaybackSession> = Arc::new(session);
    let hook = Arc::downgrade(&session);
    let state = Arc::new(PlaybackState::new(config, session));
    let (queue_tx, queue_rx) = dispatch_queue();
    let (events, receiver) = match channel {
        Some(channel) => {
            let (events, ack_tx) = channel.into_parts();
            (events, Some(EventReceiver::new(ack_tx)))
        },
        None => (crossbeam_channel::never(), None),
    };
    let target = PlaybackTarget::new(Arc::clone(&state), receiver);
    let join = thread::Builder::new()
        .name(state.config.thread_name.clone())
        .spawn(move || relay_main(target, queue_rx, events))?;
    let proxy = PlaybackProxy::new(state, queue_tx, hook, join.thread().id());
    Ok((proxy, RelayMonitor { join }))
}

/// Spawns a recording relay around `session`.
pub fn start_recording_relay<S: RecordingSession>(
    session: S,
    config: RelayConfig,
) -> io::Result<(RecordingProxy, RelayMonitor)> {
    let session: Arc<dyn RecordingSession> = Arc::new(session);
    let state = Arc::new(RecordingState::new(config, session));
    let (queue_tx, queue_rx) = dispatch_queue();
    let target = RecordingTarget::new(Arc::clone(&state));
    let join = thread::Builder::new()
        .name(state.config.thread_name.clone())
        .spawn(move || relay_main(target, queue_rx, crossbeam_channel::never()))?;
    let proxy = RecordingProxy::new(state, queue_tx, join.thread().id());
    Ok((proxy, RelayMonitor { join }))
}
