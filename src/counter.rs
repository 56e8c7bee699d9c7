use crate::timeline::{schedule_repeating, Scheduler};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTarget {
    pub value: u64,
    pub suffix: String,
}

/// Takes the first run of ASCII digits as the target; the suffix is the
/// remaining text with that run cut out, so "+50" animates as "50+". A run
/// too long for `u64` saturates.
pub fn parse_counter_text(text: &str) -> Option<CounterTarget> {
    let text = text.trim();
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let len = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - start);
    let digits = &text[start..start + len];
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);

    let mut suffix = String::with_capacity(text.len() - len);
    suffix.push_str(&text[..start]);
    suffix.push_str(&text[start + len..]);

    Some(CounterTarget { value, suffix })
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: CounterTarget,
    increment: f64,
    progress: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: CounterTarget, duration_ms: u32, step_ms: u32) -> Self {
        let steps = (f64::from(duration_ms) / f64::from(step_ms.max(1))).max(1.0);
        let increment = target.value as f64 / steps;

        Self {
            target,
            increment,
            progress: 0.0,
            finished: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        self.progress += self.increment;
        let target = self.target.value;
        let suffix = &self.target.suffix;

        if self.progress >= target as f64 {
            self.finished = true;
            return Some(format!("{target}{suffix}"));
        }

        let shown = (self.progress.floor() as u64).min(target.saturating_sub(1));
        Some(format!("{shown}{suffix}"))
    }
}

pub fn run_counter<S: Scheduler>(
    scheduler: &S,
    step_ms: u32,
    mut animation: CounterAnimation,
    mut write: impl FnMut(&str) + 'static,
) {
    schedule_repeating(scheduler, step_ms, move || match animation.next() {
        Some(text) => {
            write(&text);
            true
        }
        None => false,
    });
}
