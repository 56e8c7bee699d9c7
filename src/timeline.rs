pub type Task = Box<dyn FnOnce()>;

/// Tasks run on the single UI thread, never before `delay_ms` has elapsed.
pub trait Scheduler: Clone + 'static {
    fn schedule(&self, delay_ms: u32, task: Task);
}

pub fn schedule_repeating<S: Scheduler>(
    scheduler: &S,
    period_ms: u32,
    tick: impl FnMut() -> bool + 'static,
) {
    repeat_boxed(scheduler.clone(), period_ms, Box::new(tick));
}

fn repeat_boxed<S: Scheduler>(scheduler: S, period_ms: u32, mut tick: Box<dyn FnMut() -> bool>) {
    let next = scheduler.clone();
    scheduler.schedule(
        period_ms,
        Box::new(move || {
            if tick() {
                repeat_boxed(next, period_ms, tick);
            }
        }),
    );
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        gloo_timers::callback::Timeout::new(delay_ms, task).forget();
    }
}

#[cfg(test)]
pub mod testing {
    use super::{Scheduler, Task};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct PendingTask {
        due_ms: u64,
        seq: u64,
        task: Task,
    }

    #[derive(Default)]
    struct ClockState {
        now_ms: Cell<u64>,
        next_seq: Cell<u64>,
        pending: RefCell<Vec<PendingTask>>,
    }

    // Tasks fire in due order, ties in scheduling order.
    #[derive(Clone, Default)]
    pub struct VirtualClock {
        state: Rc<ClockState>,
    }

    impl VirtualClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now_ms(&self) -> u64 {
            self.state.now_ms.get()
        }

        pub fn pending(&self) -> usize {
            self.state.pending.borrow().len()
        }

        pub fn advance(&self, delta_ms: u64) {
            let target = self.now_ms().saturating_add(delta_ms);

            while let Some(task) = self.pop_due(target) {
                self.state.now_ms.set(task.due_ms);
                (task.task)();
            }

            self.state.now_ms.set(target);
        }

        fn pop_due(&self, target: u64) -> Option<PendingTask> {
            let mut pending = self.state.pending.borrow_mut();
            let index = pending
                .iter()
                .enumerate()
                .filter(|(_, task)| task.due_ms <= target)
                .min_by_key(|(_, task)| (task.due_ms, task.seq))
                .map(|(index, _)| index)?;

            Some(pending.swap_remove(index))
        }
    }

    impl Scheduler for VirtualClock {
        fn schedule(&self, delay_ms: u32, task: Task) {
            let seq = self.state.next_seq.get();
            self.state.next_seq.set(seq + 1);

            self.state.pending.borrow_mut().push(PendingTask {
                due_ms: self.now_ms() + u64::from(delay_ms),
                seq,
                task,
            });
        }
    }
}
