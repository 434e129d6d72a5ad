use std::panic::{AssertUnwindSafe, catch_unwind};

use crossbeam_channel::Receiver;
use tracing::warn;
use tunerelay_core::command::RelayCommand;
use tunerelay_core::input::InputEvent;

use crate::budget::BudgetExceeded;
use crate::executor::RelayExit;
use crate::queue::QueueRx;

/// Per-variant half of the execution loop: command dispatch, input
/// forwarding, and the teardown/fatal probes the loop checks between
/// commands.
pub(crate) trait RelayTarget {
    type Command: RelayCommand;

    fn execute(&mut self, command: Self::Command);

    fn handle_input(&mut self, event: InputEvent);

    fn released(&self) -> bool;

    fn fatal(&self) -> Option<BudgetExceeded>;

    fn dispose(&mut self);
}

/// Sole consumer of the dispatch queue; runs on the dedicated relay thread.
///
/// Commands are drained strictly one at a time in FIFO order. Blocking on
/// the select while idle is not execution time and never counts against any
/// command's budget.
pub(crate) fn relay_main<T: RelayTarget>(
    mut target: T,
    queue: QueueRx<T::Command>,
    events: Receiver<InputEvent>,
) -> RelayExit {
    let mut events = events;
    let wake = queue.wake().clone();
    loop {
        crossbeam_channel::select_biased! {
            recv(wake) -> token => {
                if token.is_err() {
                    queue.close();
                    warn!("every proxy dropped without a release");
                    return RelayExit::Disconnected;
                }
                let Some(command) = queue.pop() else {
                    // Wake token left behind by a coalescing removal.
                    continue;
                };
                if catch_unwind(AssertUnwindSafe(|| target.execute(command))).is_err() {
                    queue.close();
                    return RelayExit::Panicked;
                }
                if let Some(violation) = target.fatal() {
                    queue.close();
                    return RelayExit::BudgetExceeded(violation);
                }
                if target.released() {
                    target.dispose();
                    for stale in queue.close() {
                        warn!(
                            command = stale.label(),
                            "dropping command queued behind release"
                        );
                    }
                    return RelayExit::Released;
                }
            }
            recv(events) -> event => {
                match event {
                    Ok(event) => target.handle_input(event),
                    Err(_) => events = crossbeam_channel::never(),
                }
            }
        }
    }
}
