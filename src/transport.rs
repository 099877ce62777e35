//! Delivery strategies that carry an authorization request to the identity provider and
//! bring its response back.
//!
//! Both strategies stop at the raw [`AuthorizationResponse`]; verification always happens in
//! [`complete_authorization`](crate::identity::complete_authorization).

pub mod popup;
pub mod redirect;

pub use popup::*;
pub use redirect::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	identity::{AuthorizationRequest, AuthorizationResponse, PendingAuthorization},
};

/// Boxed future returned by [`LoginTransport::deliver`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Delivery, AuthError>> + 'a + Send>>;

/// Selects the delivery strategy for federated sign-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
	/// Navigate the whole page to the provider and finish on the return load.
	Redirect,
	/// Open a child window and wait for it to post the result back.
	#[default]
	Popup,
}
impl TransportKind {
	/// Returns the configuration spelling of the strategy.
	pub const fn as_str(self) -> &'static str {
		match self {
			TransportKind::Redirect => "redirect",
			TransportKind::Popup => "popup",
		}
	}
}
impl Display for TransportKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for TransportKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"redirect" => Ok(Self::Redirect),
			"popup" => Ok(Self::Popup),
			_ => Err(ConfigError::UnknownTransport { value: s.to_owned() }),
		}
	}
}

/// Result of handing a request to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
	/// The provider answered within this call.
	Response(AuthorizationResponse),
	/// The page left for the provider; the answer arrives through [`LoginTransport::resume`].
	Navigated,
}

/// A provider response recovered on page load together with the request it answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumedAuthorization {
	/// State + nonce persisted before navigating away.
	pub pending: PendingAuthorization,
	/// Parameters found in the returning URL fragment.
	pub response: AuthorizationResponse,
}

/// Carries an authorization request to the provider.
pub trait LoginTransport
where
	Self: Send + Sync,
{
	/// Strategy implemented by this transport.
	fn kind(&self) -> TransportKind;

	/// Sends `request` to the provider.
	fn deliver<'a>(&'a self, request: &'a AuthorizationRequest) -> TransportFuture<'a>;

	/// Picks up a provider response that arrived with the current page load.
	///
	/// Transports that always answer inside [`deliver`](Self::deliver) keep the default.
	fn resume(&self) -> Result<Option<ResumedAuthorization>, AuthError> {
		Ok(None)
	}
}
