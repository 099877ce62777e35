//! Crate-level error types shared across the session, identity, and data layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Persistence-medium failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) before any HTTP status was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Interactive sign-in failure.
	#[error(transparent)]
	Auth(#[from] AuthError),

	/// Backend proxy answered with a non-success status code.
	#[error("Backend proxy returned HTTP {status} for {url}.")]
	Upstream {
		/// HTTP status code returned by the proxy.
		status: u16,
		/// Request URL that produced the status.
		url: String,
	},
	/// Backend proxy returned a body that does not match the platform schema.
	#[error("Backend proxy returned malformed JSON for {url}.")]
	Parse {
		/// Structured parsing failure including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Request URL whose body failed to parse.
		url: String,
	},
	/// Backend proxy followed a well-formed JSON body with extra content.
	#[error("Backend proxy returned trailing data after the JSON body for {url}.")]
	TrailingData {
		/// Tokenizer error raised at the first trailing character.
		#[source]
		source: serde_json::Error,
		/// Request URL whose body failed to parse.
		url: String,
	},
}
impl Error {
	/// HTTP status attached to upstream failures, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Upstream { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL failed to parse.
	#[error("Configuration value `{key}` is not a valid URL.")]
	InvalidUrl {
		/// Configuration key carrying the value.
		key: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The backend base URL cannot carry path segments (e.g. `mailto:` URLs).
	#[error("Backend base URL `{url}` cannot be used as a base for API paths.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// A boolean toggle carried an unrecognized value.
	#[error("Configuration value `{key}` must be a boolean, got `{value}`.")]
	InvalidFlag {
		/// Configuration key carrying the value.
		key: &'static str,
		/// Raw value that failed to parse.
		value: String,
	},
	/// A configured identifier failed validation.
	#[error("Configuration value `{key}` is not a valid identifier.")]
	InvalidIdentifier {
		/// Configuration key carrying the value.
		key: &'static str,
		/// Underlying validation failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// The login transport name is unknown.
	#[error("Unknown login transport `{value}`; expected `redirect` or `popup`.")]
	UnknownTransport {
		/// Raw value that failed to parse.
		value: String,
	},
	/// Identity provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::identity::DescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend proxy.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend proxy.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures of an interactive sign-in attempt.
///
/// These are never recovered silently: every login operation hands them back to the
/// caller so the sign-in view can display [`AuthError::reason`] or the message.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Email or password was empty.
	#[error("Email and password are required.")]
	MissingCredentials,
	/// A configured credential verifier rejected the pair.
	#[error("Invalid email or password.")]
	InvalidCredentials,
	/// Federated login is not configured.
	#[error("{what} is not configured.")]
	NotConfigured {
		/// Missing configuration item.
		what: &'static str,
	},
	/// The browser refused to open the sign-in popup.
	#[error("Popup blocked. Please allow popups for this site and try again.")]
	PopupBlocked,
	/// The user closed the sign-in window.
	#[error("Authentication cancelled.")]
	Cancelled,
	/// The sign-in window did not answer within the allowed wait.
	#[error("Authentication timed out.")]
	Timeout,
	/// The echoed `state` is missing or does not belong to the pending request.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// The identity token carried a nonce other than the one sent.
	#[error("Identity token nonce does not match the authorization request.")]
	NonceMismatch,
	/// The identity token could not be decoded.
	#[error("Identity token is malformed: {reason}.")]
	MalformedToken {
		/// Short description of the structural problem.
		reason: String,
	},
	/// The identity provider answered with an error.
	#[error("Identity provider rejected the sign-in: {message}.")]
	ProviderRejected {
		/// Provider-supplied error code or description.
		message: String,
	},
	/// The session could not be persisted.
	#[error("Session could not be persisted: {0}")]
	Storage(#[from] crate::store::StoreError),
}
impl AuthError {
	/// Stable, machine-readable reason code.
	pub const fn reason(&self) -> &'static str {
		match self {
			Self::MissingCredentials => "missing_credentials",
			Self::InvalidCredentials => "invalid_credentials",
			Self::NotConfigured { .. } => "not_configured",
			Self::PopupBlocked => "popup_blocked",
			Self::Cancelled => "cancelled",
			Self::Timeout => "timeout",
			Self::StateMismatch => "state_mismatch",
			Self::NonceMismatch => "nonce_mismatch",
			Self::MalformedToken { .. } => "malformed_token",
			Self::ProviderRejected { .. } => "provider_error",
			Self::Storage(_) => "storage",
		}
	}

	pub(crate) fn malformed(reason: impl Into<String>) -> Self {
		Self::MalformedToken { reason: reason.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::StoreError;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "quota exceeded".into() };
		let err: Error = store_error.clone().into();

		assert!(matches!(err, Error::Storage(_)));
		assert!(err.to_string().contains("quota exceeded"));

		let source = StdError::source(&err)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn auth_reasons_are_stable() {
		assert_eq!(AuthError::PopupBlocked.reason(), "popup_blocked");
		assert_eq!(AuthError::Cancelled.reason(), "cancelled");
		assert_eq!(AuthError::Timeout.reason(), "timeout");
		assert_eq!(AuthError::StateMismatch.reason(), "state_mismatch");
		assert_eq!(AuthError::malformed("two segments").reason(), "malformed_token");
	}

	#[test]
	fn upstream_errors_expose_status() {
		let err = Error::Upstream { status: 502, url: "http://proxy/api/facebook".into() };

		assert_eq!(err.status(), Some(502));
		assert!(err.to_string().contains("502"));
		assert_eq!(Error::from(AuthError::Timeout).status(), None);
	}
}
