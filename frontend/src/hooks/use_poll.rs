use gloo_timers::callback::Interval;
use log::debug;
use shared::polling::{Cancel, PollLoop, Scheduler};
use yew::prelude::*;

/// Browser ticks from `gloo_timers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

pub struct IntervalHandle(Interval);

impl Cancel for IntervalHandle {
    fn cancel(self) {
        let _ = self.0.cancel();
    }
}

impl Scheduler for GlooScheduler {
    type Handle = IntervalHandle;

    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> IntervalHandle {
        IntervalHandle(Interval::new(period_ms, move || tick()))
    }
}

/// Runs `fetch` on mount and every `period_ms` after that. A change of `key`
/// restarts the loop; unmounting stops it before any further tick.
#[hook]
pub fn use_poll<K, F>(key: K, period_ms: u32, fetch: F)
where
    K: PartialEq + Clone + std::fmt::Debug + 'static,
    F: FnMut() + 'static,
{
    use_effect_with(key, move |key| {
        debug!("Polling {:?} every {}ms", key, period_ms);
        let mut poll = PollLoop::start(&GlooScheduler, period_ms, fetch);
        move || poll.stop()
    });
}
