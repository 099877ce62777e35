//! Email + password sign-in.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{UserId, UserRecord},
	flows::{self, AuthController},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

const LOCAL_ID_PREFIX: &str = "local-";
const LOCAL_ID_DIGEST_LEN: usize = 22;
const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";
const AVATAR_BACKGROUND: &str = "344767";
const AVATAR_COLOR: &str = "fff";

/// Boxed future returned by [`CredentialVerifier::verify`].
pub type VerifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), AuthError>> + 'a + Send>>;

/// Checks an email + password pair before a local session is created.
pub trait CredentialVerifier
where
	Self: Send + Sync,
{
	/// Resolves to `Ok(())` when the pair is acceptable, otherwise to
	/// [`AuthError::InvalidCredentials`].
	fn verify<'a>(&'a self, email: &'a str, password: &'a str) -> VerifyFuture<'a>;
}

/// Accepts every non-empty pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoVerifier;
impl CredentialVerifier for DemoVerifier {
	fn verify<'a>(&'a self, _email: &'a str, _password: &'a str) -> VerifyFuture<'a> {
		Box::pin(async { Ok(()) })
	}
}

impl AuthController {
	/// Signs in with an email and password and persists the resulting local user.
	///
	/// Both values must be non-empty. The user id is derived from the lowercased email so
	/// repeated sign-ins map to the same record.
	pub async fn login_with_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<UserRecord, AuthError> {
		let span = FlowSpan::new(FlowKind::PasswordLogin, "login");

		obs::record_flow_outcome(FlowKind::PasswordLogin, FlowOutcome::Attempt);

		let result = span.instrument(self.password_login(email, password)).await;

		flows::record(FlowKind::PasswordLogin, &result);

		result
	}

	async fn password_login(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
		let email = email.trim();

		if email.is_empty() || password.is_empty() {
			return Err(AuthError::MissingCredentials);
		}

		self.verifier.verify(email, password).await?;

		self.establish(local_user(email)?)
	}
}

/// Builds the local user record for a password sign-in.
pub fn local_user(email: &str) -> Result<UserRecord, AuthError> {
	let id = UserId::new(local_user_id(email)).map_err(|_| AuthError::InvalidCredentials)?;
	let name = match email.split('@').next() {
		Some(local) if !local.is_empty() => local.to_owned(),
		_ => email.to_owned(),
	};
	let avatar = Url::parse_with_params(
		AVATAR_ENDPOINT,
		[("name", name.as_str()), ("background", AVATAR_BACKGROUND), ("color", AVATAR_COLOR)],
	)
	.ok();

	Ok(UserRecord { id, email: email.to_owned(), name, avatar, provider: None })
}

fn local_user_id(email: &str) -> String {
	let digest = Sha256::digest(email.to_lowercase().as_bytes());
	let mut encoded = URL_SAFE_NO_PAD.encode(digest);

	encoded.truncate(LOCAL_ID_DIGEST_LEN);

	format!("{LOCAL_ID_PREFIX}{encoded}")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn local_user_takes_name_from_the_email_local_part() {
		let user = local_user("jane@x.com").expect("Local user should build.");

		assert_eq!(user.name, "jane");
		assert_eq!(user.email, "jane@x.com");
		assert!(!user.is_federated());

		let avatar = user.avatar.expect("Local users get a generated avatar.");

		assert_eq!(avatar.host_str(), Some("ui-avatars.com"));
		assert!(avatar.query().is_some_and(|q| q.contains("name=jane")));
	}

	#[test]
	fn local_ids_are_stable_and_case_insensitive() {
		let a = local_user_id("Jane@X.com");
		let b = local_user_id("jane@x.com");

		assert_eq!(a, b);
		assert!(a.starts_with(LOCAL_ID_PREFIX));
		assert_eq!(a.len(), LOCAL_ID_PREFIX.len() + LOCAL_ID_DIGEST_LEN);
		assert_ne!(a, local_user_id("john@x.com"));
	}

	#[test]
	fn address_without_local_part_keeps_the_full_email_as_name() {
		assert_eq!(local_user("@x.com").expect("Local user should build.").name, "@x.com");
	}
}
