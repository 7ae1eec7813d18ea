//! Dashboard session lifecycle.
//!
//! This module owns the credentials and the one authenticated browser page a
//! client may hold, and the transitions between logged-out, logged-in and
//! closed.

/// Login-page recognition used for failure and expiry detection.
pub mod detector;
/// Session manager performing login, lazy re-login and teardown.
pub mod manager;
/// Session lifecycle status and the live page slot.
pub mod state;

/// Login-page predicate and its default implementation.
pub use detector::{LoginDetector, LoginPageDetector};
/// Session manager.
pub use manager::SessionManager;
/// Session lifecycle status.
pub use state::SessionStatus;
