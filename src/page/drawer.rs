//! Mobile navigation drawer
//!
//! A two-state machine over the page's slide-in menu. Hosts feed it UI
//! events and apply the returned effects: the `open` class, the
//! `aria-hidden` attribute, and the body scroll lock always move together.

/// UI events the drawer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    /// Hamburger button click
    OpenClicked,
    /// Close button click
    CloseClicked,
    /// Click anywhere on the drawer surface; `on_backdrop` is true when the
    /// click hit the backdrop itself rather than the sliding panel
    SurfaceClicked { on_backdrop: bool },
    /// Navigation link inside the panel
    PanelLinkClicked,
    EscapePressed,
}

/// What the host must apply to the document for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerEffects {
    /// Whether the drawer element carries the `open` class
    pub class_open: bool,
    /// Value for the `aria-hidden` attribute
    pub aria_hidden: bool,
    /// Whether page scrolling is suppressed
    pub scroll_locked: bool,
}

/// Drawer state machine. Starts closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawer {
    open: bool,
}

impl Drawer {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Effects for the current state, applyable at any time.
    pub fn effects(&self) -> DrawerEffects {
        DrawerEffects {
            class_open: self.open,
            aria_hidden: !self.open,
            scroll_locked: self.open,
        }
    }

    /// Process one event. Returns effects exactly when the state changed;
    /// `None` means the document is already right (closing a closed drawer,
    /// clicking inside the open panel).
    pub fn handle(&mut self, event: DrawerEvent) -> Option<DrawerEffects> {
        let target = match event {
            DrawerEvent::OpenClicked => true,
            DrawerEvent::CloseClicked
            | DrawerEvent::PanelLinkClicked
            | DrawerEvent::EscapePressed => false,
            DrawerEvent::SurfaceClicked { on_backdrop } => {
                if on_backdrop {
                    false
                } else {
                    self.open
                }
            }
        };
        if target == self.open {
            return None;
        }
        self.open = target;
        Some(self.effects())
    }
}

impl Default for Drawer {
    fn default() -> Self {
        Self::new()
    }
}
