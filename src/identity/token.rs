//! Identity token decoding.
//!
//! Signatures are not verified here: the token arrives over the provider's own redirect and
//! is only used to populate the local user record.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	auth::{IdentityProvider, UserId, UserRecord},
};

/// Claims extracted from the identity token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
	/// Provider-scoped subject identifier.
	pub sub: String,
	/// Email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Avatar URL.
	#[serde(default)]
	pub picture: Option<String>,
	/// Nonce copied from the authorization request.
	#[serde(default)]
	pub nonce: Option<String>,
	/// Every other claim, untouched.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

/// Decodes the payload segment of a three-segment identity token.
pub fn decode_identity_token(token: &str) -> Result<IdentityClaims, AuthError> {
	let mut segments = token.split('.');
	let (Some(_header), Some(payload), Some(_signature), None) =
		(segments.next(), segments.next(), segments.next(), segments.next())
	else {
		return Err(AuthError::malformed("expected three dot-separated segments"));
	};

	if payload.is_empty() {
		return Err(AuthError::malformed("payload segment is empty"));
	}

	let bytes = URL_SAFE_NO_PAD
		.decode(payload.trim_end_matches('='))
		.map_err(|e| AuthError::malformed(format!("payload is not base64url ({e})")))?;

	serde_json::from_slice(&bytes)
		.map_err(|e| AuthError::malformed(format!("payload is not a claims object ({e})")))
}

/// Maps decoded claims onto the local user record, tagged with `provider`.
pub fn to_user_record(
	claims: &IdentityClaims,
	provider: IdentityProvider,
) -> Result<UserRecord, AuthError> {
	let id = UserId::new(&claims.sub)
		.map_err(|e| AuthError::malformed(format!("subject claim is unusable ({e})")))?;
	let email = claims.email.clone().unwrap_or_default();
	let name = match &claims.name {
		Some(name) if !name.trim().is_empty() => name.clone(),
		_ => email.split('@').next().filter(|local| !local.is_empty()).unwrap_or(&claims.sub).to_owned(),
	};
	let avatar = claims.picture.as_deref().and_then(|raw| Url::parse(raw).ok());

	Ok(UserRecord { id, email, name, avatar, provider: Some(provider) })
}
