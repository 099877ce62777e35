//! The signed-in user record persisted as the session.

// self
use crate::{_prelude::*, auth::UserId};

/// Identity provider that issued a federated session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProvider {
	/// Google identity services.
	Google,
}
impl IdentityProvider {
	/// Returns a stable label suitable for span fields and persisted records.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdentityProvider::Google => "google",
		}
	}
}
impl Display for IdentityProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Local user record created at sign-in and persisted as the sole session object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	/// Stable user identifier.
	pub id: UserId,
	/// Email address used to sign in.
	pub email: String,
	/// Display name.
	pub name: String,
	/// Avatar image URL, if one is known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar: Option<Url>,
	/// Issuing provider; absent for password sign-in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider: Option<IdentityProvider>,
}
impl UserRecord {
	/// Returns `true` when the record came from a federated provider.
	pub fn is_federated(&self) -> bool {
		self.provider.is_some()
	}
}
