use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEventKind {
    Key { code: u32, pressed: bool },
    Pointer { x: f32, y: f32 },
}

/// One raw input event in flight, keyed by the sequence id its sender
/// assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub seq: u64,
    pub kind: InputEventKind,
}

/// Boolean acknowledgment delivered back to the transport for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReceipt {
    pub seq: u64,
    pub handled: bool,
}

struct AckShared {
    seq: u64,
    tx: Sender<EventReceipt>,
    finished: AtomicBool,
}

/// Completion handle for one forwarded input event.
///
/// Cloneable so a session may keep it past `dispatch_input_event` and finish
/// it later from any thread. Only the first `finish` delivers a receipt;
/// later calls are ignored.
#[derive(Clone)]
pub struct EventAck {
    shared: Arc<AckShared>,
}

impl EventAck {
    pub fn new(seq: u64, tx: Sender<EventReceipt>) -> Self {
        Self {
            shared: Arc::new(AckShared {
                seq,
                tx,
                finished: AtomicBool::new(false),
            }),
        }
    }

    pub fn seq(&self) -> u64 {
        self.shared.seq
    }

    pub fn finish(&self, handled: bool) {
        if self.shared.finished.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.shared.tx.send(EventReceipt {
            seq: self.shared.seq,
            handled,
        });
    }
}

impl std::fmt::Debug for EventAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventAck")
            .field("seq", &self.shared.seq)
            .field("finished", &self.shared.finished.load(Ordering::Acquire))
            .finish()
    }
}

/// Receiving end of the input transport, moved into a playback relay at
/// construction and disposed with it at teardown.
pub struct InputChannel {
    pub(crate) events: Receiver<InputEvent>,
    pub(crate) ack_tx: Sender<EventReceipt>,
}

impl InputChannel {
    pub fn into_parts(self) -> (Receiver<InputEvent>, Sender<EventReceipt>) {
        (self.events, self.ack_tx)
    }
}

/// Sending end of the input transport, kept by the event producer.
pub struct InputEventSender {
    next_seq: AtomicU64,
    tx: Sender<InputEvent>,
    acks: Receiver<EventReceipt>,
}

impl InputEventSender {
    /// Sends one event and returns the sequence id assigned to it, or `None`
    /// once the receiving side has been disposed.
    pub fn send(&self, kind: InputEventKind) -> Option<u64> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.tx.send(InputEvent { seq, kind }).ok()?;
        Some(seq)
    }

    pub fn recv_receipt(&self, timeout: Duration) -> Option<EventReceipt> {
        self.acks.recv_timeout(timeout).ok()
    }

    pub fn try_recv_receipt(&self) -> Option<EventReceipt> {
        self.acks.try_recv().ok()
    }
}

/// Creates a connected transport pair for raw input events.
pub fn input_channel() -> (InputEventSender, InputChannel) {
    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let (ack_tx, ack_rx) = crossbeam_channel::unbounded();
    let sender = InputEventSender {
        next_seq: AtomicU64::new(1),
        tx: event_tx,
        acks: ack_rx,
    };
    let channel = InputChannel {
        events: event_rx,
        ack_tx,
    };
    (sender, channel)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{EventReceipt, InputEventKind, input_channel};

    const TEST_TIMEOUT: Duration = Duration::from_millis(200);

    #[test]
    fn sequence_ids_are_assigned_in_order() {
        let (sender, channel) = input_channel();
        let first = sender
            .send(InputEventKind::Key {
                code: 23,
                pressed: true,
            })
            .expect("send first event");
        let second = sender
            .send(InputEventKind::Key {
                code: 23,
                pressed: false,
            })
            .expect("send second event");
        assert!(second > first);
        let received = channel.events.recv_timeout(TEST_TIMEOUT).expect("recv");
        assert_eq!(received.seq, first);
    }

    #[test]
    fn only_the_first_finish_delivers_a_receipt() {
        let (sender, channel) = input_channel();
        let seq = sender
            .send(InputEventKind::Pointer { x: 1.0, y: 2.0 })
            .expect("send event");
        let event = channel.events.recv_timeout(TEST_TIMEOUT).expect("recv");
        let ack = super::EventAck::new(event.seq, channel.ack_tx.clone());
        let clone = ack.clone();
        ack.finish(true);
        clone.finish(false);
        assert_eq!(
            sender.recv_receipt(TEST_TIMEOUT),
            Some(EventReceipt { seq, handled: true })
        );
        assert_eq!(sender.try_recv_receipt(), None);
    }

    #[test]
    fn send_fails_once_the_channel_is_disposed() {
        let (sender, channel) = input_channel();
        drop(channel);
        assert_eq!(
            sender.send(InputEventKind::Key {
                code: 4,
                pressed: true,
            }),
            None
        );
    }
}
