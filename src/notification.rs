use std::cell::Cell;
use std::rc::Rc;

use crate::timeline::Scheduler;

pub const NOTIFICATION_CLASS: &str = "notification";
pub const NOTIFICATION_SHOW_CLASS: &str = "show";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTiming {
    pub enter_delay_ms: u32,
    pub visible_until_ms: u32,
    pub exit_duration_ms: u32,
}

impl ToastTiming {
    pub fn removed_at_ms(&self) -> u32 {
        self.visible_until_ms.saturating_add(self.exit_duration_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Idle,
    Entering,
    Visible,
    Leaving,
    Removed,
}

pub trait ToastSurface: 'static {
    type Node: 'static;

    fn mount(&self, message: &str) -> Option<Self::Node>;
    fn set_shown(&self, node: &Self::Node, shown: bool);
    fn unmount(&self, node: &Self::Node);
}

#[derive(Clone)]
pub struct ToastTicket {
    phase: Rc<Cell<ToastPhase>>,
}

impl ToastTicket {
    pub fn phase(&self) -> ToastPhase {
        self.phase.get()
    }
}

// Each toast runs its own timeline; concurrent toasts are not deduplicated.
pub fn show_notification<T, S>(
    surface: &Rc<T>,
    scheduler: &S,
    timing: ToastTiming,
    message: &str,
) -> ToastTicket
where
    T: ToastSurface,
    S: Scheduler,
{
    let phase = Rc::new(Cell::new(ToastPhase::Idle));
    let ticket = ToastTicket {
        phase: phase.clone(),
    };

    let Some(node) = surface.mount(message) else {
        return ticket;
    };
    let node = Rc::new(node);
    phase.set(ToastPhase::Entering);

    {
        let surface = surface.clone();
        let node = node.clone();
        let phase = phase.clone();
        scheduler.schedule(
            timing.enter_delay_ms,
            Box::new(move || {
                surface.set_shown(&node, true);
                phase.set(ToastPhase::Visible);
            }),
        );
    }

    {
        let surface = surface.clone();
        let node = node.clone();
        let phase = phase.clone();
        scheduler.schedule(
            timing.visible_until_ms,
            Box::new(move || {
                surface.set_shown(&node, false);
                phase.set(ToastPhase::Leaving);
            }),
        );
    }

    {
        let surface = surface.clone();
        scheduler.schedule(
            timing.removed_at_ms(),
            Box::new(move || {
                surface.unmount(&node);
                phase.set(ToastPhase::Removed);
            }),
        );
    }

    ticket
}

#[cfg(test)]
pub mod testing {
    use super::ToastSurface;
    use std::cell::RefCell;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct FakeToast {
        pub message: String,
        pub shown: bool,
        pub mounted: bool,
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub toasts: RefCell<Vec<FakeToast>>,
    }

    impl RecordingSurface {
        pub fn snapshot(&self, index: usize) -> FakeToast {
            self.toasts.borrow()[index].clone()
        }
    }

    impl ToastSurface for RecordingSurface {
        type Node = usize;

        fn mount(&self, message: &str) -> Option<usize> {
            let mut toasts = self.toasts.borrow_mut();
            toasts.push(FakeToast {
                message: message.to_string(),
                shown: false,
                mounted: true,
            });
            Some(toasts.len() - 1)
        }

        fn set_shown(&self, node: &usize, shown: bool) {
            self.toasts.borrow_mut()[*node].shown = shown;
        }

        fn unmount(&self, node: &usize) {
            self.toasts.borrow_mut()[*node].mounted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSurface;
    use super::*;
    use crate::config::InteractionConfig;
    use crate::timeline::testing::VirtualClock;

    fn default_timing() -> ToastTiming {
        InteractionConfig::default().toast
    }

    #[test]
    fn toast_follows_enter_visible_leave_remove_sequence() {
        let clock = VirtualClock::new();
        let surface = Rc::new(RecordingSurface::default());

        let ticket = show_notification(&surface, &clock, default_timing(), "hola");
        assert_eq!(ticket.phase(), ToastPhase::Entering);
        assert!(!surface.snapshot(0).shown);

        clock.advance(99);
        assert_eq!(ticket.phase(), ToastPhase::Entering);

        clock.advance(1);
        assert_eq!(ticket.phase(), ToastPhase::Visible);
        assert!(surface.snapshot(0).shown);

        clock.advance(2_899);
        assert!(surface.snapshot(0).shown);

        clock.advance(1);
        assert_eq!(ticket.phase(), ToastPhase::Leaving);
        assert!(!surface.snapshot(0).shown);
        assert!(surface.snapshot(0).mounted);

        clock.advance(299);
        assert_eq!(ticket.phase(), ToastPhase::Leaving);

        clock.advance(1);
        assert_eq!(ticket.phase(), ToastPhase::Removed);
        assert!(!surface.snapshot(0).mounted);
        assert_eq!(clock.now_ms(), 3_300);
    }

    #[test]
    fn concurrent_toasts_keep_independent_timelines() {
        let clock = VirtualClock::new();
        let surface = Rc::new(RecordingSurface::default());

        let first = show_notification(&surface, &clock, default_timing(), "uno");
        clock.advance(1_000);
        let second = show_notification(&surface, &clock, default_timing(), "uno");

        clock.advance(2_300);
        assert_eq!(first.phase(), ToastPhase::Removed);
        assert_eq!(second.phase(), ToastPhase::Visible);
        assert_eq!(surface.toasts.borrow().len(), 2);

        clock.advance(1_000);
        assert_eq!(second.phase(), ToastPhase::Removed);
    }

    struct UnavailableSurface;

    impl ToastSurface for UnavailableSurface {
        type Node = ();

        fn mount(&self, _message: &str) -> Option<()> {
            None
        }

        fn set_shown(&self, _node: &(), _shown: bool) {}

        fn unmount(&self, _node: &()) {}
    }

    #[test]
    fn unmountable_toast_stays_idle_and_schedules_nothing() {
        let clock = VirtualClock::new();
        let ticket = show_notification(
            &Rc::new(UnavailableSurface),
            &clock,
            default_timing(),
            "nada",
        );

        assert_eq!(ticket.phase(), ToastPhase::Idle);
        assert_eq!(clock.pending(), 0);
    }
}
