//! OAuth 2.0 implicit-flow identity adapter: request building, fragment parsing, token
//! decoding, and the completion path shared by every delivery transport.

pub mod descriptor;
pub mod request;
pub mod response;
pub mod token;

pub use descriptor::*;
pub use request::*;
pub use response::*;
pub use token::*;

// self
use crate::{
	_prelude::*,
	auth::{IdentityProvider, UserRecord},
};

/// Verifies a provider response against the pending request and maps it to a user.
///
/// Checks run in a fixed order: state, provider error, token presence, token decoding,
/// nonce. A token without a `nonce` claim is accepted.
pub fn complete_authorization(
	expected: &PendingAuthorization,
	response: &AuthorizationResponse,
	provider: IdentityProvider,
) -> Result<UserRecord, AuthError> {
	expected.validate_state(response.state.as_deref())?;

	if let Some(e) = response.provider_error() {
		return Err(e);
	}

	let token = response
		.id_token
		.as_ref()
		.ok_or_else(|| AuthError::malformed("response carried no identity token"))?;
	let claims = decode_identity_token(token.expose())?;

	if claims.nonce.as_deref().is_some_and(|nonce| nonce != expected.nonce) {
		return Err(AuthError::NonceMismatch);
	}

	to_user_record(&claims, provider)
}
