//! Parsing of the provider's callback fragment.

// self
use crate::{_prelude::*, auth::IdToken};

/// Parameters the provider appends to the redirect URI fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationResponse {
	/// Signed identity token (JWT).
	pub id_token: Option<IdToken>,
	/// OAuth access token; not used for the session but recognized as a callback marker.
	pub access_token: Option<IdToken>,
	/// Echoed state value.
	pub state: Option<String>,
	/// Provider error code.
	pub error: Option<String>,
	/// Provider error description.
	pub error_description: Option<String>,
}
impl AuthorizationResponse {
	/// Parses a URL fragment, with or without its leading `#`.
	pub fn from_fragment(fragment: &str) -> Self {
		let raw = fragment.strip_prefix('#').unwrap_or(fragment);
		let mut response = Self::default();

		for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
			let value = value.into_owned();

			match key.as_ref() {
				"id_token" => response.id_token = Some(IdToken::new(value)),
				"access_token" => response.access_token = Some(IdToken::new(value)),
				"state" => response.state = Some(value),
				"error" => response.error = Some(value),
				"error_description" => response.error_description = Some(value),
				_ => {},
			}
		}

		response
	}

	/// Returns `true` when the fragment looks like a provider callback.
	pub fn is_callback(&self) -> bool {
		self.id_token.is_some() || self.access_token.is_some() || self.error.is_some()
	}

	/// Converts a provider error into [`AuthError::ProviderRejected`], if present.
	pub fn provider_error(&self) -> Option<AuthError> {
		self.error.as_ref().map(|code| AuthError::ProviderRejected {
			message: match &self.error_description {
				Some(description) => format!("{code} ({description})"),
				None => code.clone(),
			},
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn fragment_parsing_decodes_known_parameters() {
		let response = AuthorizationResponse::from_fragment(
			"#state=abc&access_token=ya29.x&token_type=Bearer&id_token=h.p.s&expires_in=3599",
		);

		assert_eq!(response.state.as_deref(), Some("abc"));
		assert_eq!(response.id_token.as_ref().map(IdToken::expose), Some("h.p.s"));
		assert!(response.is_callback());
		assert!(response.provider_error().is_none());
	}

	#[test]
	fn provider_errors_and_unrelated_fragments() {
		let response =
			AuthorizationResponse::from_fragment("error=access_denied&error_description=User%20denied&state=s");

		assert!(response.is_callback());
		assert_eq!(
			response.provider_error().map(|e| e.to_string()),
			Some("Identity provider rejected the sign-in: access_denied (User denied).".into())
		);
		assert!(!AuthorizationResponse::from_fragment("#section-2").is_callback());
		assert!(!AuthorizationResponse::from_fragment("").is_callback());
	}
}
