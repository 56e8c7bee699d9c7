pub const MENU_TOGGLE_ID: &str = "menuToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuEvent {
    ToggleClicked,
    LinkClicked,
    OutsideClicked,
    Resized { width: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuTransition {
    pub changed: bool,
    pub open: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    // Markup may ship with the panel already open.
    pub fn with_open(open: bool) -> Self {
        Self { open }
    }

    pub fn apply(&mut self, event: MenuEvent, breakpoint: f64) -> MenuTransition {
        let next = match event {
            MenuEvent::ToggleClicked => !self.open,
            MenuEvent::LinkClicked | MenuEvent::OutsideClicked => false,
            MenuEvent::Resized { width } if !is_mobile_width(width, breakpoint) => false,
            MenuEvent::Resized { .. } => self.open,
        };

        let changed = next != self.open;
        self.open = next;

        MenuTransition {
            changed,
            open: next,
        }
    }
}

pub fn is_mobile_width(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}
