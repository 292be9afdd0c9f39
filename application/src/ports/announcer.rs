//! Announcer port
//!
//! Announcements are fire-and-forget: the service never awaits them and an
//! adapter that fails to deliver logs the failure itself. The methods are
//! synchronous and non-fallible so they cannot disturb a committed
//! transition.

use std::time::Duration;

pub trait Announcer: Send + Sync {
    /// Deliver `text` now.
    fn announce(&self, text: &str);

    /// Deliver `text` after `delay`. Must return immediately.
    fn announce_after_delay(&self, text: &str, delay: Duration);
}
