//! Periodic refresh with response sequencing.
//!
//! A [`PollLoop`] fetches once immediately and then on every tick of a
//! [`Scheduler`]. Fetches may overlap; each carries a ticket from a
//! [`PollSequencer`] so a response that lands after a newer one has been
//! applied is dropped instead of rolling the view back.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

/// Monotonic ticket attached to one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct SequencerState {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

/// Cheap to clone; clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct PollSequencer {
    state: Rc<SequencerState>,
}

impl PollSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the ticket for a fetch about to be issued.
    pub fn issue(&self) -> Ticket {
        let next = self.state.issued.get() + 1;
        self.state.issued.set(next);
        Ticket(next)
    }

    /// Returns true if the response for `ticket` should be applied. A
    /// response older than the last applied one is rejected.
    pub fn accept(&self, ticket: Ticket) -> bool {
        let applied = self.state.applied.get();
        if ticket.0 <= applied {
            warn!(
                "Discarding stale poll response #{} (latest applied #{})",
                ticket.0, applied
            );
            return false;
        }
        self.state.applied.set(ticket.0);
        true
    }

    #[cfg(test)]
    pub fn issued(&self) -> u64 {
        self.state.issued.get()
    }
}

/// Handle returned by a [`Scheduler`]; cancelling stops further ticks.
pub trait Cancel {
    fn cancel(self);
}

/// Source of periodic ticks. The browser build wraps `gloo_timers`.
pub trait Scheduler {
    type Handle: Cancel;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// A running poll. Stops on [`PollLoop::stop`] or when dropped.
pub struct PollLoop<H: Cancel> {
    handle: Option<H>,
    stopped: Rc<Cell<bool>>,
}

impl<H: Cancel> PollLoop<H> {
    /// Calls `fetch` right away, then every `period_ms`.
    pub fn start<S, F>(scheduler: &S, period_ms: u32, mut fetch: F) -> Self
    where
        S: Scheduler<Handle = H>,
        F: FnMut() + 'static,
    {
        debug!("Starting poll loop every {}ms", period_ms);
        fetch();
        let stopped = Rc::new(Cell::new(false));
        let guard = stopped.clone();
        let handle = scheduler.every(
            period_ms,
            Box::new(move || {
                if !guard.get() {
                    fetch();
                }
            }),
        );
        Self {
            handle: Some(handle),
            stopped,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    pub fn stop(&mut self) {
        self.stopped.set(true);
        if let Some(handle) = self.handle.take() {
            debug!("Stopping poll loop");
            handle.cancel();
        }
    }
}

impl<H: Cancel> Drop for PollLoop<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use test_log::test;

    type Ticks = Rc<RefCell<Vec<Box<dyn FnMut()>>>>;

    /// Fires ticks only when told to.
    #[derive(Default)]
    struct ManualScheduler {
        ticks: Ticks,
        cancelled: Rc<Cell<u32>>,
    }

    struct ManualHandle {
        ticks: Ticks,
        cancelled: Rc<Cell<u32>>,
    }

    impl Cancel for ManualHandle {
        fn cancel(self) {
            self.ticks.borrow_mut().clear();
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn every(&self, _period_ms: u32, tick: Box<dyn FnMut()>) -> ManualHandle {
            self.ticks.borrow_mut().push(tick);
            ManualHandle {
                ticks: self.ticks.clone(),
                cancelled: self.cancelled.clone(),
            }
        }
    }

    impl ManualScheduler {
        fn fire(&self) {
            for tick in self.ticks.borrow_mut().iter_mut() {
                tick();
            }
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_fetches_immediately_then_on_each_tick() {
        let scheduler = ManualScheduler::default();
        let (count, fetch) = counter();
        let _poll = PollLoop::start(&scheduler, 3_000, fetch);
        assert_eq!(count.get(), 1);
        scheduler.fire();
        scheduler.fire();
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_no_fetch_after_stop() {
        let scheduler = ManualScheduler::default();
        let (count, fetch) = counter();
        let mut poll = PollLoop::start(&scheduler, 3_000, fetch);
        poll.stop();
        scheduler.fire();
        assert_eq!(count.get(), 1);
        assert!(!poll.is_running());

        poll.stop();
        assert_eq!(scheduler.cancelled.get(), 1);
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = ManualScheduler::default();
        let (count, fetch) = counter();
        drop(PollLoop::start(&scheduler, 3_000, fetch));
        scheduler.fire();
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.cancelled.get(), 1);
    }

    #[test]
    fn test_sequencer_drops_out_of_order_responses() {
        let seq = PollSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert_eq!(seq.issued(), 2);
    }

    #[test]
    fn test_sequencer_in_order_responses_all_apply() {
        let seq = PollSequencer::new();
        let tickets: Vec<_> = (0..3).map(|_| seq.issue()).collect();
        assert!(tickets.into_iter().all(|t| seq.accept(t)));
    }

    #[test]
    fn test_sequencer_clones_share_state() {
        let seq = PollSequencer::new();
        let other = seq.clone();
        let t = other.issue();
        assert!(seq.accept(t));
        assert!(!other.accept(t));
    }
}
