//! Page-behavior collaborators around the estimate widget: the mobile
//! navigation drawer, reveal-on-scroll tracking, broken-image placeholders,
//! and the footer year.

pub mod drawer;
pub mod placeholder;
pub mod reveal;
pub mod year;

pub use drawer::{Drawer, DrawerEffects, DrawerEvent};
pub use placeholder::FallbackTracker;
pub use reveal::RevealObserver;
