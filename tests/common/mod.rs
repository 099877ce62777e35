//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::HashMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use tokio::sync::mpsc;
use url::Url;
// self
use campaign_pulse::{
	auth::ClientId,
	config::DashboardConfig,
	error::TransportError,
	flows::AuthController,
	http::{ApiHttpClient, ApiResponse, HttpFuture},
	identity::IdentityProviderDescriptor,
	sources::ProxyClient,
	store::{MemoryBackend, SessionStore},
	transport::{LoginTransport, PageLocation, PopupEvent, PopupHandle, PopupHost, PopupWindow},
};

pub const APP_ORIGIN: &str = "http://localhost:3000";
pub const CLIENT_ID: &str = "1234-demo.apps.googleusercontent.com";

pub fn app_origin() -> Url {
	Url::parse(APP_ORIGIN).expect("App origin fixture should parse.")
}

pub fn config() -> DashboardConfig {
	DashboardConfig::new(app_origin(), app_origin())
		.expect("Config fixture should build.")
		.with_google_client_id(ClientId::new(CLIENT_ID).expect("Client id fixture should be valid."))
}

pub fn controller(backend: &MemoryBackend, transport: Arc<dyn LoginTransport>) -> AuthController {
	let redirect_uri =
		config().resolve_redirect_uri().expect("Redirect URI fixture should resolve.");

	AuthController::new(
		SessionStore::new(Arc::new(backend.clone())),
		transport,
		IdentityProviderDescriptor::google().expect("Google descriptor should build."),
		redirect_uri,
	)
	.with_client_id(ClientId::new(CLIENT_ID).expect("Client id fixture should be valid."))
}

/// Unsigned JWT carrying `claims`; signatures are never checked.
pub fn id_token(claims: serde_json::Value) -> String {
	let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

	format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn jane_claims(nonce: &str) -> serde_json::Value {
	serde_json::json!({
		"sub": "1078",
		"email": "jane@x.com",
		"name": "Jane Doe",
		"picture": "https://lh3.example.com/jane.jpg",
		"nonce": nonce,
	})
}

pub fn proxy_client(proxy: &Arc<FakeProxy>) -> ProxyClient {
	ProxyClient::new(proxy.clone(), app_origin()).expect("App origin should be a usable base.")
}

pub fn query_param(url: &Url, key: &str) -> Option<String> {
	url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}

/// Callback fragment answering the authorization request encoded in `authorize_url`.
pub fn callback_fragment(authorize_url: &Url) -> String {
	let state = query_param(authorize_url, "state").expect("Authorize URL should carry a state.");
	let nonce = query_param(authorize_url, "nonce").expect("Authorize URL should carry a nonce.");

	format!(
		"access_token=ya29.token&token_type=Bearer&state={state}&id_token={}",
		id_token(jane_claims(&nonce))
	)
}

type Route = Box<dyn Fn() -> Result<ApiResponse, TransportError> + Send + Sync>;

/// In-process proxy keyed by `path?query`; unknown routes answer 404.
#[derive(Default)]
pub struct FakeProxy {
	routes: Mutex<HashMap<String, Route>>,
	calls: AtomicUsize,
	seen: Mutex<Vec<String>>,
	delay: Mutex<Duration>,
}
impl FakeProxy {
	/// Every later request waits `delay` before answering.
	pub fn set_delay(&self, delay: Duration) {
		*self.delay.lock().expect("Delay lock should not be poisoned.") = delay;
	}

	pub fn route(&self, path_and_query: &str, status: u16, body: &str) {
		let body = body.to_owned();

		self.routes.lock().expect("Route table lock should not be poisoned.").insert(
			path_and_query.to_owned(),
			Box::new(move || Ok(ApiResponse::new(status, body.clone()))),
		);
	}

	pub fn fail(&self, path_and_query: &str) {
		self.routes.lock().expect("Route table lock should not be poisoned.").insert(
			path_and_query.to_owned(),
			Box::new(|| {
				Err(TransportError::Io(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				)))
			}),
		);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn seen(&self) -> Vec<String> {
		self.seen.lock().expect("Seen list lock should not be poisoned.").clone()
	}
}
impl ApiHttpClient for FakeProxy {
	fn get(&self, url: Url) -> HttpFuture<'_> {
		Box::pin(async move {
			let key = match url.query() {
				Some(query) => format!("{}?{query}", url.path()),
				None => url.path().to_owned(),
			};

			let delay = *self.delay.lock().expect("Delay lock should not be poisoned.");

			self.calls.fetch_add(1, Ordering::SeqCst);
			self.seen.lock().expect("Seen list lock should not be poisoned.").push(key.clone());

			if !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}

			let routes = self.routes.lock().expect("Route table lock should not be poisoned.");

			match routes.get(&key) {
				Some(route) => route(),
				None => Ok(ApiResponse::new(404, "not found")),
			}
		})
	}
}

/// Address bar double.
#[derive(Default)]
pub struct FakePage {
	pub fragment: Mutex<Option<String>>,
	pub navigations: Mutex<Vec<Url>>,
	pub scrubbed: AtomicBool,
}
impl FakePage {
	pub fn last_navigation(&self) -> Option<Url> {
		self.navigations.lock().expect("Navigation lock should not be poisoned.").last().cloned()
	}

	pub fn land_on(&self, fragment: String) {
		*self.fragment.lock().expect("Fragment lock should not be poisoned.") = Some(fragment);
	}
}
impl PageLocation for FakePage {
	fn navigate(&self, url: &Url) {
		self.navigations.lock().expect("Navigation lock should not be poisoned.").push(url.clone());
	}

	fn fragment(&self) -> Option<String> {
		self.fragment.lock().expect("Fragment lock should not be poisoned.").clone()
	}

	fn scrub_fragment(&self) {
		self.scrubbed.store(true, Ordering::SeqCst);
		*self.fragment.lock().expect("Fragment lock should not be poisoned.") = None;
	}
}

#[derive(Default)]
pub struct FakeWindow(pub Arc<AtomicBool>);
impl PopupWindow for FakeWindow {
	fn close(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	fn is_closed(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

type Script = Box<dyn Fn(&Url) -> Vec<PopupEvent> + Send + Sync>;

/// Popup opener that replays scripted events computed from the opened URL.
pub struct ScriptedPopups {
	script: Option<Script>,
	senders: Mutex<Vec<mpsc::UnboundedSender<PopupEvent>>>,
	pub closed: Arc<AtomicBool>,
	pub opened: Mutex<Vec<Url>>,
}
impl ScriptedPopups {
	pub fn new(script: impl Fn(&Url) -> Vec<PopupEvent> + Send + Sync + 'static) -> Self {
		Self {
			script: Some(Box::new(script)),
			senders: Mutex::default(),
			closed: Arc::default(),
			opened: Mutex::default(),
		}
	}

	pub fn blocked() -> Self {
		Self {
			script: None,
			senders: Mutex::default(),
			closed: Arc::default(),
			opened: Mutex::default(),
		}
	}
}
impl PopupHost for ScriptedPopups {
	fn open(&self, url: &Url, _target: &str, _features: &str) -> Option<PopupHandle> {
		let script = self.script.as_ref()?;
		let (tx, rx) = mpsc::unbounded_channel();

		self.opened.lock().expect("Opened list lock should not be poisoned.").push(url.clone());

		for event in script(url) {
			let _ = tx.send(event);
		}

		// A live sender keeps a silent popup waiting for the timer.
		self.senders.lock().expect("Sender list lock should not be poisoned.").push(tx);

		Some(PopupHandle { window: Box::new(FakeWindow(self.closed.clone())), events: rx })
	}
}
