use std::fmt;

use omnisense_runtime::PageDriver;

/// Where a session is in its lifecycle.
///
/// Only `Authenticated` has a browser page behind it. Both other states allow
/// a fresh login, explicit or lazy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
	/// No login attempted yet, or the dashboard ended the previous session.
	#[default]
	Unauthenticated,
	/// Logged in; the page is reused for every fetch.
	Authenticated,
	/// Resources released by `close` or by a failed login.
	Closed,
}

impl fmt::Display for SessionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SessionStatus::Unauthenticated => write!(f, "unauthenticated"),
			SessionStatus::Authenticated => write!(f, "authenticated"),
			SessionStatus::Closed => write!(f, "closed"),
		}
	}
}

/// The one browser page a client may hold, kept in step with its [`SessionStatus`].
///
/// A page is present exactly when the status is `Authenticated`.
#[derive(Default)]
pub(crate) struct SessionState {
	page: Option<Box<dyn PageDriver>>,
	status: SessionStatus,
}

impl SessionState {
	pub(crate) fn status(&self) -> SessionStatus {
		self.status
	}

	/// Stores `page` as the live session and hands it back.
	pub(crate) fn activate(&mut self, page: Box<dyn PageDriver>) -> &mut dyn PageDriver {
		self.status = SessionStatus::Authenticated;
		self.page.insert(page).as_mut()
	}

	/// The live page, moved out so it can be handed back through [`SessionState::activate`].
	pub(crate) fn take_live(&mut self) -> Option<Box<dyn PageDriver>> {
		self.page.take()
	}

	/// Moves to `Closed`, returning the page that was live, if any.
	pub(crate) fn release(&mut self) -> Option<Box<dyn PageDriver>> {
		self.status = SessionStatus::Closed;
		self.page.take()
	}

	/// Moves to `Unauthenticated`. The page must already be released.
	pub(crate) fn expire(&mut self) {
		self.status = SessionStatus::Unauthenticated;
	}
}

impl fmt::Debug for SessionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.status, f)
	}
}
