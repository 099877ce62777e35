//! Session phases published by the auth controller.

// self
use crate::{_prelude::*, auth::UserRecord};

/// Lifecycle phase of the auth controller.
///
/// `Restoring` is only ever the initial phase; once the persisted session has been checked
/// the controller moves between `Authenticated` and `Anonymous` for the rest of its life.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
	/// The persisted session has not been checked yet.
	#[default]
	Restoring,
	/// A user is signed in.
	Authenticated(UserRecord),
	/// Nobody is signed in.
	Anonymous,
}
impl AuthPhase {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			AuthPhase::Restoring => "restoring",
			AuthPhase::Authenticated(_) => "authenticated",
			AuthPhase::Anonymous => "anonymous",
		}
	}
}

/// View of the session handed to the rest of the application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
	/// Signed-in user, if any.
	pub user: Option<UserRecord>,
	/// Mirrors `user.is_some()`.
	pub is_authenticated: bool,
	/// True only while the persisted session is being restored.
	pub loading: bool,
}
impl SessionState {
	/// Decides what a protected view should do with this session.
	pub fn access(&self) -> Access {
		match (self.loading, self.is_authenticated) {
			(true, _) => Access::Pending,
			(false, true) => Access::Granted,
			(false, false) => Access::SignIn,
		}
	}
}
impl From<&AuthPhase> for SessionState {
	fn from(phase: &AuthPhase) -> Self {
		let user = match phase {
			AuthPhase::Authenticated(user) => Some(user.clone()),
			_ => None,
		};

		Self {
			is_authenticated: user.is_some(),
			user,
			loading: matches!(phase, AuthPhase::Restoring),
		}
	}
}

/// Routing decision for views that require a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
	/// Session restore has not finished; show a loading indicator.
	Pending,
	/// Nobody is signed in; send the user to the sign-in view.
	SignIn,
	/// Render the protected view.
	Granted,
}
