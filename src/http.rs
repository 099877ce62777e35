//! Transport primitives for backend proxy requests.
//!
//! The module exposes [`ApiHttpClient`], the data layer's only dependency on an HTTP stack,
//! and [`ApiResponse`], the status + body pair every source adapter interprets. Custom
//! clients (test doubles, other HTTP stacks) implement the trait; the `reqwest` feature
//! ships [`ReqwestHttpClient`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, HeaderValue};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Raw response handed back to the source adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports able to issue proxy `GET` requests.
///
/// Implementations must be `Send + Sync + 'static` so one client can be shared by every
/// source adapter behind an [`Arc`]. A transport failure (DNS, TCP, TLS, body read) is a
/// [`TransportError`]; any HTTP status, including errors, is returned as a response.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a `GET` request for `url`.
	fn get(&self, url: Url) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn get(&self, url: Url) -> HttpFuture<'_> {
		Box::pin(async move {
			let response = self
				.0
				.get(url)
				.header(ACCEPT, HeaderValue::from_static("application/json"))
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
