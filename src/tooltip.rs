use std::collections::HashMap;

pub const TOOLTIP_ATTRIBUTE: &str = "data-tooltip";
pub const TOOLTIP_CLASS: &str = "tooltip";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
}

// Needs the tooltip's rendered size, so it runs after the node is attached.
pub fn place_above(trigger: Rect, tooltip_width: f64, tooltip_height: f64, gap: f64) -> Placement {
    Placement {
        top: trigger.top - tooltip_height - gap,
        left: trigger.left + trigger.width / 2.0 - tooltip_width / 2.0,
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TooltipHandle(u64);

#[derive(Debug)]
pub struct Tooltips<N> {
    next_id: u64,
    shown: HashMap<u64, N>,
}

impl<N> Default for Tooltips<N> {
    fn default() -> Self {
        Self {
            next_id: 0,
            shown: HashMap::new(),
        }
    }
}

impl<N> Tooltips<N> {
    pub fn show(&mut self, node: N) -> TooltipHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.shown.insert(id, node);
        TooltipHandle(id)
    }

    pub fn hide(&mut self, handle: TooltipHandle) -> Option<N> {
        self.shown.remove(&handle.0)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.shown.len()
    }
}
