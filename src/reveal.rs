use std::collections::HashSet;
use std::hash::Hash;

use crate::counter::{parse_counter_text, CounterTarget};
use crate::timeline::Scheduler;

pub const OBSERVED_SELECTOR: &str = ".timeline-item, .achievement-card, .skill-category, \
     .skill-item, .stat-number, .info-card, .value-card, .interest-card, \
     .education-card, .cert-card, .project-card, .soft-skill-card";
pub const REVEALED_CLASS: &str = "animate-in";
pub const STAT_NUMBER_CLASS: &str = "stat-number";
pub const SKILL_ITEM_CLASS: &str = "skill-item";
pub const SKILL_PROGRESS_SELECTOR: &str = ".skill-progress";
pub const OBSERVER_THRESHOLD: f64 = 0.2;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// An element may carry both classes; each one adds its own animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealKind {
    pub stat_counter: bool,
    pub skill_item: bool,
}

impl RevealKind {
    pub fn from_class_list<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = Self::default();
        for class in classes {
            match class {
                STAT_NUMBER_CLASS => kind.stat_counter = true,
                SKILL_ITEM_CLASS => kind.skill_item = true,
                _ => {}
            }
        }
        kind
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealAction {
    MarkRevealed,
    AnimateCounter(CounterTarget),
    AnimateSkillBar,
}

#[derive(Debug)]
pub struct AnimatedRegistry<K> {
    animated: HashSet<K>,
}

impl<K> Default for AnimatedRegistry<K> {
    fn default() -> Self {
        Self {
            animated: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> AnimatedRegistry<K> {
    pub fn claim(&mut self, key: K) -> bool {
        self.animated.insert(key)
    }
}

#[derive(Debug)]
pub struct RevealTracker<K> {
    registry: AnimatedRegistry<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            registry: AnimatedRegistry::default(),
        }
    }
}

impl<K: Eq + Hash> RevealTracker<K> {
    /// `counter` is the stat element's key and text; `bar` is the key of a
    /// skill item's progress bar.
    pub fn on_intersect(
        &mut self,
        counter: Option<(K, &str)>,
        bar: Option<K>,
    ) -> Vec<RevealAction> {
        let mut actions = vec![RevealAction::MarkRevealed];

        if let Some((key, text)) = counter {
            if let Some(target) = parse_counter_text(text) {
                if self.registry.claim(key) {
                    actions.push(RevealAction::AnimateCounter(target));
                }
            }
        }

        if let Some(key) = bar {
            if self.registry.claim(key) {
                actions.push(RevealAction::AnimateSkillBar);
            }
        }

        actions
    }
}

pub fn run_skill_bar<S: Scheduler>(
    scheduler: &S,
    delay_ms: u32,
    target_width: String,
    write: impl Fn(&str) + 'static,
) {
    write("0");
    scheduler.schedule(delay_ms, Box::new(move || write(&target_width)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::testing::VirtualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counter(value: u64, suffix: &str) -> RevealAction {
        RevealAction::AnimateCounter(CounterTarget {
            value,
            suffix: suffix.to_string(),
        })
    }

    #[test]
    fn kind_is_detected_from_classes() {
        assert_eq!(
            RevealKind::from_class_list(["info-card"]),
            RevealKind::default()
        );
        assert_eq!(
            RevealKind::from_class_list(["skill-item", "wide"]),
            RevealKind {
                stat_counter: false,
                skill_item: true,
            }
        );
        assert_eq!(
            RevealKind::from_class_list(["stat-number"]),
            RevealKind {
                stat_counter: true,
                skill_item: false,
            }
        );
    }

    #[test]
    fn element_with_both_classes_runs_both_animations() {
        let kind = RevealKind::from_class_list(["stat-number", "skill-item"]);
        assert!(kind.stat_counter && kind.skill_item);

        let mut tracker = RevealTracker::default();
        let actions = tracker.on_intersect(Some((1_u32, "95%")), Some(2_u32));
        assert_eq!(
            actions,
            vec![
                RevealAction::MarkRevealed,
                counter(95, "%"),
                RevealAction::AnimateSkillBar,
            ]
        );
    }

    #[test]
    fn counter_animates_only_on_first_intersection() {
        let mut tracker = RevealTracker::default();

        let first = tracker.on_intersect(Some((7_u32, "50+")), None);
        assert_eq!(first, vec![RevealAction::MarkRevealed, counter(50, "+")]);

        let second = tracker.on_intersect(Some((7_u32, "50+")), None);
        assert_eq!(second, vec![RevealAction::MarkRevealed]);
    }

    #[test]
    fn counter_without_digits_is_not_claimed() {
        let mut tracker = RevealTracker::default();

        let actions = tracker.on_intersect(Some((1_u32, "N/A")), None);
        assert_eq!(actions, vec![RevealAction::MarkRevealed]);

        let later = tracker.on_intersect(Some((1_u32, "40")), None);
        assert_eq!(later, vec![RevealAction::MarkRevealed, counter(40, "")]);
    }

    #[test]
    fn skill_bar_animates_once_and_needs_a_bar() {
        let mut tracker = RevealTracker::<u32>::default();

        assert_eq!(
            tracker.on_intersect(None, None),
            vec![RevealAction::MarkRevealed]
        );
        assert_eq!(
            tracker.on_intersect(None, Some(3)),
            vec![RevealAction::MarkRevealed, RevealAction::AnimateSkillBar]
        );
        assert_eq!(
            tracker.on_intersect(None, Some(3)),
            vec![RevealAction::MarkRevealed]
        );
    }

    #[test]
    fn skill_bar_resets_then_restores_width_after_delay() {
        let clock = VirtualClock::new();
        let width = Rc::new(RefCell::new("85%".to_string()));

        let target = width.borrow().clone();
        let sink = width.clone();
        run_skill_bar(&clock, 100, target, move |value| {
            *sink.borrow_mut() = value.to_string();
        });

        assert_eq!(*width.borrow(), "0");
        clock.advance(99);
        assert_eq!(*width.borrow(), "0");
        clock.advance(1);
        assert_eq!(*width.borrow(), "85%");
    }
}
