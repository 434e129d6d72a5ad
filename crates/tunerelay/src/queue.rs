use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use tracing::warn;
use tunerelay_core::command::RelayCommand;

struct QueueState<C> {
    items: VecDeque<C>,
    closed: bool,
}

/// Producer half of the dispatch queue, cloned into every proxy.
///
/// Enqueueing never blocks. Coalescing removal and the FIFO append happen
/// under one lock, so a superseded command can never slip past its
/// replacement. The wake channel only signals "something may be there"; a
/// token left behind by a coalescing removal shows up as a spurious wakeup
/// on the consumer side.
pub(crate) struct QueueTx<C: RelayCommand> {
    state: Arc<Mutex<QueueState<C>>>,
    wake: Sender<()>,
}

impl<C: RelayCommand> Clone for QueueTx<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            wake: self.wake.clone(),
        }
    }
}

impl<C: RelayCommand> QueueTx<C> {
    pub(crate) fn send(&self, command: C) {
        {
            let mut state = self.state.lock().expect("dispatch queue lock poisoned");
            if state.closed {
                warn!(command = command.label(), "dropping command for released relay");
                return;
            }
            state
                .items
                .retain(|pending| !command.coalesces_with(pending));
            state.items.push_back(command);
        }
        let _ = self.wake.send(());
    }
}

/// Consumer half, owned by the execution loop thread.
pub(crate) struct QueueRx<C: RelayCommand> {
    state: Arc<Mutex<QueueState<C>>>,
    wake: Receiver<()>,
}

impl<C: RelayCommand> QueueRx<C> {
    pub(crate) fn wake(&self) -> &Receiver<()> {
        &self.wake
    }

    pub(crate) fn pop(&self) -> Option<C> {
        self.state
            .lock()
            .expect("dispatch queue lock poisoned")
            .items
            .pop_front()
    }

    /// Marks the queue closed and returns whatever was still pending.
    pub(crate) fn close(&self) -> Vec<C> {
        let mut state = self.state.lock().expect("dispatch queue lock poisoned");
        state.closed = true;
        state.items.drain(..).collect()
    }
}

pub(crate) fn dispatch_queue<C: RelayCommand>() -> (QueueTx<C>, QueueRx<C>) {
    let state = Arc::new(Mutex::new(QueueState {
        items: VecDeque::new(),
        closed: false,
    }));
    let (wake_tx, wake_rx) = crossbeam_channel::unbounded();
    (
        QueueTx {
            state: Arc::clone(&state),
            wake: wake_tx,
        },
        QueueRx {
            state,
            wake: wake_rx,
        },
    )
}

#[cfg(test)]
mod tests {
    use tunerelay_core::command::PlaybackCommand;
    use tunerelay_core::types::ParamMap;

    use super::dispatch_queue;

    fn tune(uri: &str) -> PlaybackCommand {
        PlaybackCommand::Tune {
            uri: uri.to_string(),
            params: ParamMap::new(),
        }
    }

    #[test]
    fn pops_in_enqueue_order() {
        let (tx, rx) = dispatch_queue();
        tx.send(PlaybackCommand::SetMain { is_main: true });
        tx.send(PlaybackCommand::SetStreamVolume { volume: 0.5 });
        tx.send(PlaybackCommand::TimeShiftPause);
        assert!(matches!(
            rx.pop(),
            Some(PlaybackCommand::SetMain { is_main: true })
        ));
        assert!(matches!(
            rx.pop(),
            Some(PlaybackCommand::SetStreamVolume { .. })
        ));
        assert!(matches!(rx.pop(), Some(PlaybackCommand::TimeShiftPause)));
        assert!(rx.pop().is_none());
    }

    #[test]
    fn newer_tune_replaces_pending_tune_in_place() {
        let (tx, rx) = dispatch_queue();
        tx.send(PlaybackCommand::SetMain { is_main: true });
        tx.send(tune("service://channel/1"));
        tx.send(PlaybackCommand::TimeShiftPause);
        tx.send(tune("service://channel/2"));

        assert!(matches!(rx.pop(), Some(PlaybackCommand::SetMain { .. })));
        assert!(matches!(rx.pop(), Some(PlaybackCommand::TimeShiftPause)));
        match rx.pop() {
            Some(PlaybackCommand::Tune { uri, .. }) => {
                assert_eq!(uri, "service://channel/2");
            },
            other => panic!("expected the superseding tune, got {other:?}"),
        }
        assert!(rx.pop().is_none());
    }

    #[test]
    fn close_drains_and_rejects_later_sends() {
        let (tx, rx) = dispatch_queue();
        tx.send(PlaybackCommand::RemoveOverlayView);
        tx.send(PlaybackCommand::TimeShiftResume);
        let drained = rx.close();
        assert_eq!(drained.len(), 2);
        tx.send(PlaybackCommand::SetMain { is_main: false });
        assert!(rx.pop().is_none());
    }

    #[test]
    fn every_send_leaves_a_wake_token() {
        let (tx, rx) = dispatch_queue();
        tx.send(tune("service://channel/1"));
        tx.send(tune("service://channel/2"));
        // The superseded tune is gone but both tokens remain; the second
        // pop is the spurious wakeup the consumer loop tolerates.
        assert_eq!(rx.wake().len(), 2);
        assert!(rx.pop().is_some());
        assert!(rx.pop().is_none());
    }
}
