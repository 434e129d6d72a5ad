use std::sync::Arc;

use crossbeam_channel::Sender;
use tunerelay_core::input::{EventAck, EventReceipt, InputEvent};
use tunerelay_core::session::{InputDisposition, PlaybackSession};

/// Forwards raw input events to the session and acknowledges them.
///
/// Bound only for playback relays constructed with a transport channel;
/// dropped when the teardown command executes, which disconnects the
/// transport.
pub(crate) struct EventReceiver {
    ack_tx: Sender<EventReceipt>,
}

impl EventReceiver {
    pub(crate) fn new(ack_tx: Sender<EventReceipt>) -> Self {
        Self { ack_tx }
    }

    pub(crate) fn on_input_event(
        &self,
        session: Option<Arc<dyn PlaybackSession>>,
        event: InputEvent,
    ) {
        let ack = EventAck::new(event.seq, self.ack_tx.clone());
        let Some(session) = session else {
            ack.finish(false);
            return;
        };
        match session.dispatch_input_event(event, ack.clone()) {
            InputDisposition::Handled => ack.finish(true),
            InputDisposition::NotHandled => ack.finish(false),
            InputDisposition::Pending => {},
        }
    }
}
