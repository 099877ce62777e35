//! Child-window delivery.
//!
//! The popup lands on the redirect URI, which posts a [`PopupPayload`] back to the opener.
//! The parent waits on one event channel plus a single timer instead of polling the window.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio::sync::mpsc::UnboundedReceiver;
// self
use crate::{
	_prelude::*,
	identity::{AuthorizationRequest, AuthorizationResponse},
	obs,
	transport::{Delivery, LoginTransport, TransportFuture, TransportKind},
};

/// Window name used for the sign-in popup.
pub const POPUP_TARGET: &str = "google-oauth";
/// Window features requested for the sign-in popup.
pub const POPUP_FEATURES: &str = "width=500,height=600,scrollbars=yes,resizable=yes";
/// How long the parent waits for the popup before giving up.
pub const DEFAULT_POPUP_TIMEOUT: StdDuration = StdDuration::from_secs(5 * 60);

/// Opens child windows on behalf of the popup transport.
pub trait PopupHost
where
	Self: Send + Sync,
{
	/// Opens `url` in a new window; `None` means the browser blocked it.
	fn open(&self, url: &Url, target: &str, features: &str) -> Option<PopupHandle>;
}

/// Control surface of an opened popup.
pub trait PopupWindow
where
	Self: Send + Sync,
{
	/// Closes the window.
	fn close(&self);

	/// Returns `true` once the window is gone.
	fn is_closed(&self) -> bool;
}

/// An opened popup and the events it produces.
pub struct PopupHandle {
	/// The child window.
	pub window: Box<dyn PopupWindow>,
	/// Messages posted by the child plus its close notification.
	pub events: UnboundedReceiver<PopupEvent>,
}
impl Debug for PopupHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PopupHandle").field("closed", &self.window.is_closed()).finish()
	}
}

/// Something the parent window observed about the popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupEvent {
	/// A cross-window message.
	Message {
		/// Origin of the sending window.
		origin: String,
		/// Message body.
		payload: PopupPayload,
	},
	/// The user closed the popup.
	Closed,
}

/// Body the popup posts to its opener.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PopupPayload {
	/// The provider redirected back with a callback fragment.
	#[serde(rename = "GOOGLE_AUTH_SUCCESS")]
	Success {
		/// Raw callback fragment; the parent verifies it.
		fragment: String,
	},
	/// The provider redirected back with an error.
	#[serde(rename = "GOOGLE_AUTH_ERROR")]
	Error {
		/// Provider error message.
		error: String,
	},
}

/// Builds the payload a popup landing on `fragment` should post to its opener.
///
/// Returns `None` when the fragment is not a provider callback.
pub fn popup_payload_for_fragment(fragment: &str) -> Option<PopupPayload> {
	let raw = fragment.strip_prefix('#').unwrap_or(fragment);
	let response = AuthorizationResponse::from_fragment(raw);

	if let Some(code) = response.error {
		return Some(PopupPayload::Error { error: response.error_description.unwrap_or(code) });
	}

	response.is_callback().then(|| PopupPayload::Success { fragment: raw.to_owned() })
}

/// Delivers the request through a popup window.
#[derive(Clone)]
pub struct PopupTransport {
	host: Arc<dyn PopupHost>,
	origin: String,
	timeout: StdDuration,
}
impl PopupTransport {
	/// Creates a transport that only trusts messages from `app_origin`.
	pub fn new(host: Arc<dyn PopupHost>, app_origin: &Url) -> Self {
		Self { host, origin: app_origin.origin().ascii_serialization(), timeout: DEFAULT_POPUP_TIMEOUT }
	}

	/// Overrides how long to wait for the popup.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Origin messages must come from.
	pub fn origin(&self) -> &str {
		&self.origin
	}

	async fn wait(&self, handle: PopupHandle) -> Result<Delivery, AuthError> {
		let PopupHandle { window, mut events } = handle;
		let deadline = tokio::time::sleep(self.timeout);

		tokio::pin!(deadline);

		loop {
			tokio::select! {
				event = events.recv() => match event {
					Some(PopupEvent::Message { origin, payload }) => {
						if origin != self.origin {
							obs::debug_foreign_message(&origin);

							continue;
						}

						window.close();

						return match payload {
							PopupPayload::Success { fragment } =>
								Ok(Delivery::Response(AuthorizationResponse::from_fragment(&fragment))),
							PopupPayload::Error { error } =>
								Err(AuthError::ProviderRejected { message: error }),
						};
					},
					Some(PopupEvent::Closed) | None => return Err(AuthError::Cancelled),
				},
				_ = &mut deadline => {
					if !window.is_closed() {
						window.close();
					}

					return Err(AuthError::Timeout);
				},
			}
		}
	}
}
impl Debug for PopupTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PopupTransport")
			.field("origin", &self.origin)
			.field("timeout", &self.timeout)
			.finish()
	}
}
impl LoginTransport for PopupTransport {
	fn kind(&self) -> TransportKind {
		TransportKind::Popup
	}

	fn deliver<'a>(&'a self, request: &'a AuthorizationRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let handle = self
				.host
				.open(&request.authorize_url, POPUP_TARGET, POPUP_FEATURES)
				.ok_or(AuthError::PopupBlocked)?;

			self.wait(handle).await
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicBool, Ordering};
	// crates.io
	use tokio::sync::mpsc::{self, UnboundedSender};
	// self
	use super::*;
	use crate::{
		auth::ClientId,
		identity::{IdentityProviderDescriptor, build_authorization_request},
	};

	const APP: &str = "https://dash.example.com";

	#[derive(Default)]
	struct FakeWindow(Arc<AtomicBool>);
	impl PopupWindow for FakeWindow {
		fn close(&self) {
			self.0.store(true, Ordering::SeqCst);
		}

		fn is_closed(&self) -> bool {
			self.0.load(Ordering::SeqCst)
		}
	}

	struct FakeHost {
		handle: Mutex<Option<PopupHandle>>,
		opened: Mutex<Vec<(Url, String, String)>>,
	}
	impl FakeHost {
		fn blocked() -> Self {
			Self { handle: Mutex::new(None), opened: Mutex::new(Vec::new()) }
		}

		fn with_window() -> (Self, UnboundedSender<PopupEvent>, Arc<AtomicBool>) {
			let (tx, rx) = mpsc::unbounded_channel();
			let closed = Arc::new(AtomicBool::new(false));
			let handle = PopupHandle { window: Box::new(FakeWindow(closed.clone())), events: rx };

			(Self { handle: Mutex::new(Some(handle)), opened: Mutex::new(Vec::new()) }, tx, closed)
		}
	}
	impl PopupHost for FakeHost {
		fn open(&self, url: &Url, target: &str, features: &str) -> Option<PopupHandle> {
			self.opened.lock().push((url.clone(), target.into(), features.into()));
			self.handle.lock().take()
		}
	}

	fn request() -> AuthorizationRequest {
		build_authorization_request(
			&IdentityProviderDescriptor::google().expect("Google descriptor should build."),
			&ClientId::new("client-1").expect("Client id fixture should be valid."),
			&Url::parse("https://dash.example.com/authentication/sign-in")
				.expect("Redirect fixture should parse."),
		)
	}

	fn transport(host: FakeHost) -> PopupTransport {
		PopupTransport::new(Arc::new(host), &Url::parse(APP).expect("Origin fixture should parse."))
	}

	#[test]
	fn payloads_mirror_the_callback_fragment() {
		assert_eq!(
			popup_payload_for_fragment("#id_token=h.p.s&state=abc"),
			Some(PopupPayload::Success { fragment: "id_token=h.p.s&state=abc".into() })
		);
		assert_eq!(
			popup_payload_for_fragment("error=access_denied&error_description=Nope"),
			Some(PopupPayload::Error { error: "Nope".into() })
		);
		assert_eq!(popup_payload_for_fragment("#top"), None);

		let json = serde_json::to_value(PopupPayload::Error { error: "x".into() })
			.expect("Payload should serialize.");

		assert_eq!(json["type"], "GOOGLE_AUTH_ERROR");
	}

	#[tokio::test]
	async fn blocked_popup_fails_fast() {
		let request = request();
		let host = FakeHost::blocked();
		let transport = transport(host);
		let err = transport.deliver(&request).await.expect_err("Blocked popup should fail.");

		assert!(matches!(err, AuthError::PopupBlocked));
	}

	#[tokio::test]
	async fn foreign_origins_are_ignored_until_the_app_answers() {
		let request = request();
		let (host, tx, closed) = FakeHost::with_window();
		let host = Arc::new(host);
		let transport = PopupTransport::new(
			host.clone(),
			&Url::parse(APP).expect("Origin fixture should parse."),
		);
		let fragment = format!("id_token=h.p.s&state={}", request.state());

		tx.send(PopupEvent::Message {
			origin: "https://evil.example.com".into(),
			payload: PopupPayload::Error { error: "spoofed".into() },
		})
		.expect("Channel should be open.");
		tx.send(PopupEvent::Message {
			origin: APP.into(),
			payload: PopupPayload::Success { fragment: fragment.clone() },
		})
		.expect("Channel should be open.");

		let delivery = transport.deliver(&request).await.expect("App message should win.");

		assert_eq!(delivery, Delivery::Response(AuthorizationResponse::from_fragment(&fragment)));
		assert!(closed.load(Ordering::SeqCst));

		let opened = host.opened.lock();

		assert_eq!(opened.len(), 1);
		assert_eq!(opened[0].0, request.authorize_url);
		assert_eq!(opened[0].1, POPUP_TARGET);
		assert_eq!(opened[0].2, POPUP_FEATURES);
	}

	#[tokio::test]
	async fn closing_the_popup_cancels() {
		let request = request();
		let (host, tx, _closed) = FakeHost::with_window();
		let transport = transport(host);

		tx.send(PopupEvent::Closed).expect("Channel should be open.");

		assert!(matches!(transport.deliver(&request).await, Err(AuthError::Cancelled)));
	}

	#[tokio::test(start_paused = true)]
	async fn silent_popup_times_out_and_is_closed() {
		let request = request();
		let (host, _tx, closed) = FakeHost::with_window();
		let transport = transport(host).with_timeout(StdDuration::from_secs(30));

		assert!(matches!(transport.deliver(&request).await, Err(AuthError::Timeout)));
		assert!(closed.load(Ordering::SeqCst));
	}
}
