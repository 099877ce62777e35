//! Per-platform adapters over the backend proxy.
//!
//! Every adapter call is exactly one `GET {base}/api/{platform}?{query}`. A non-2xx status
//! becomes [`Error::Upstream`], a transport failure [`Error::Transport`], and a body that
//! does not match the platform schema [`Error::Parse`], or
//! [`Error::TrailingData`] when anything but whitespace follows it.
//! Nothing is substituted here; fallback policy belongs to the hooks.

pub mod analytics;
pub mod email;
pub mod sales;
pub mod social;

pub use analytics::AnalyticsSource;
pub use email::EmailSource;
pub use sales::{SalesQuery, SalesSource};
pub use social::{DEFAULT_DATE_RANGE, SocialSource};

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::ApiHttpClient,
	obs::FlowSpan,
	snapshot::Schema,
};

/// Upstream platform served by the backend proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
	/// Email campaign service.
	Email,
	/// Social ad service.
	Social,
	/// Web analytics service.
	Analytics,
	/// Spreadsheet-backed sales tracker.
	Sales,
}
impl Platform {
	/// Proxy path segment, also used as the span and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Platform::Email => "mailchimp",
			Platform::Social => "facebook",
			Platform::Analytics => "google-analytics",
			Platform::Sales => "google-sheets",
		}
	}
}
impl Display for Platform {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Shared HTTP plumbing for the platform adapters.
#[derive(Clone)]
pub struct ProxyClient {
	http: Arc<dyn ApiHttpClient>,
	base: Url,
}
impl ProxyClient {
	/// Creates a client rooted at `base`.
	pub fn new(http: Arc<dyn ApiHttpClient>, base: Url) -> Result<Self, ConfigError> {
		if base.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedBaseUrl { url: base.into() });
		}

		Ok(Self { http, base })
	}

	/// Base URL requests are rooted at.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Builds `{base}/api/{platform}?{query}`.
	pub fn endpoint(&self, platform: Platform, query: &[(&str, &str)]) -> Url {
		let mut url = self.base.clone();

		url.set_query(None);
		url.set_fragment(None);

		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().push("api").push(platform.as_str());
		}
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		url
	}

	pub(crate) async fn fetch<S>(&self, platform: Platform, query: &[(&str, &str)]) -> Result<S>
	where
		S: Schema + Send,
	{
		let url = self.endpoint(platform, query);
		let span = FlowSpan::fetch(platform, url.query().unwrap_or_default());

		span.instrument(async move {
			let response = self.http.get(url.clone()).await?;

			if !response.is_success() {
				return Err(Error::Upstream { status: response.status, url: url.into() });
			}

			let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
			let wire = serde_path_to_error::deserialize(&mut deserializer)
				.map_err(|source| Error::Parse { source, url: url.to_string() })?;

			deserializer.end().map_err(|source| Error::TrailingData { source, url: url.into() })?;

			Ok(S::from_wire(wire, OffsetDateTime::now_utc()))
		})
		.await
	}
}
impl Debug for ProxyClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProxyClient").field("base", &self.base.as_str()).finish()
	}
}
