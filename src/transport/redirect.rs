//! Full-page redirect delivery.

// self
use crate::{
	_prelude::*,
	identity::{AuthorizationRequest, AuthorizationResponse, PendingAuthorization},
	obs,
	store::{SessionBackend, StoreError},
	transport::{Delivery, LoginTransport, ResumedAuthorization, TransportFuture, TransportKind},
};

/// Key holding the pending `{state, nonce}` while the page is away at the provider.
pub const PENDING_KEY: &str = "dashboard-oauth-pending";

/// The address bar of the hosting page.
pub trait PageLocation
where
	Self: Send + Sync,
{
	/// Sends the whole page to `url`.
	fn navigate(&self, url: &Url);

	/// Current URL fragment without the leading `#`, if any.
	fn fragment(&self) -> Option<String>;

	/// Removes the fragment from the visible address without reloading.
	fn scrub_fragment(&self);
}

/// Delivers the request by navigating the page and finishes on the return load.
#[derive(Clone)]
pub struct RedirectTransport {
	page: Arc<dyn PageLocation>,
	backend: Arc<dyn SessionBackend>,
}
impl RedirectTransport {
	/// Creates a transport that keeps the pending request in `backend`.
	pub fn new(page: Arc<dyn PageLocation>, backend: Arc<dyn SessionBackend>) -> Self {
		Self { page, backend }
	}

	fn take_pending(&self) -> Result<Option<PendingAuthorization>, StoreError> {
		let raw = self.backend.read(PENDING_KEY)?;

		let Some(raw) = raw else {
			return Ok(None);
		};

		if let Err(e) = self.backend.remove(PENDING_KEY) {
			obs::warn_storage_failure("resume", &e);
		}

		Ok(serde_json::from_str(&raw).ok())
	}
}
impl Debug for RedirectTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RedirectTransport").field("pending_key", &PENDING_KEY).finish()
	}
}
impl LoginTransport for RedirectTransport {
	fn kind(&self) -> TransportKind {
		TransportKind::Redirect
	}

	fn deliver<'a>(&'a self, request: &'a AuthorizationRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let pending = serde_json::to_string(request.pending()).map_err(|e| {
				StoreError::Serialization { message: format!("Failed to serialize pending request: {e}") }
			})?;

			self.backend.write(PENDING_KEY, pending)?;
			self.page.navigate(&request.authorize_url);

			Ok(Delivery::Navigated)
		})
	}

	fn resume(&self) -> Result<Option<ResumedAuthorization>, AuthError> {
		let Some(fragment) = self.page.fragment() else {
			return Ok(None);
		};
		let response = AuthorizationResponse::from_fragment(&fragment);

		if !response.is_callback() {
			return Ok(None);
		}

		self.page.scrub_fragment();

		match self.take_pending()? {
			Some(pending) => Ok(Some(ResumedAuthorization { pending, response })),
			None => Err(AuthError::StateMismatch),
		}
	}
}
