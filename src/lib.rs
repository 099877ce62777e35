//! Session lifecycle, federated sign-in, and fallback-aware metric aggregation for marketing
//! analytics dashboards.
//!
//! The crate covers the client-side core of a dashboard: a persisted session record, an
//! OAuth 2.0 implicit-flow identity adapter with redirect and popup delivery, an auth
//! controller state machine, per-platform data source adapters behind a backend proxy, and
//! aggregation hooks that fan out concurrently and substitute fallback snapshots on failure.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fallback;
pub mod flows;
pub mod hooks;
pub mod http;
pub mod identity;
pub mod obs;
pub mod snapshot;
pub mod sources;
pub mod store;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{AuthError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
