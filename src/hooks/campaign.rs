//! Sales + analytics hook.

// self
use crate::{
	_prelude::*,
	fallback,
	hooks::shared::{self, HookCore},
	snapshot::{AnalyticsSnapshot, SalesSnapshot, Sourced},
	sources::{AnalyticsSource, Platform, SalesQuery, SalesSource},
};

/// Published state of a [`CampaignHook`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignData {
	/// Sales tracker snapshot.
	pub sales_data: Option<Sourced<SalesSnapshot>>,
	/// Web analytics overview.
	pub analytics_data: Option<Sourced<AnalyticsSnapshot>>,
	/// True while a load or refresh is in flight.
	pub loading: bool,
	/// Failures that had no fallback.
	pub error: Option<String>,
}
impl CampaignData {
	fn pending() -> Self {
		Self { sales_data: None, analytics_data: None, loading: true, error: None }
	}
}

/// Per-call fallbacks for [`CampaignHook`]; `None` surfaces the failure instead.
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignFallbacks {
	/// Substitute for a failed sales call.
	pub sales: Option<SalesSnapshot>,
	/// Substitute for a failed analytics overview.
	pub analytics: Option<AnalyticsSnapshot>,
}
impl CampaignFallbacks {
	/// No fallbacks at all.
	pub fn none() -> Self {
		Self { sales: None, analytics: None }
	}
}
impl Default for CampaignFallbacks {
	fn default() -> Self {
		Self { sales: Some(fallback::sales()), analytics: Some(fallback::analytics()) }
	}
}

/// Loads sales and analytics data side by side.
#[derive(Debug)]
pub struct CampaignHook {
	sales: SalesSource,
	analytics: AnalyticsSource,
	query: SalesQuery,
	fallbacks: CampaignFallbacks,
	use_fallback_data: bool,
	core: HookCore<CampaignData>,
}
impl CampaignHook {
	/// Creates the hook.
	///
	/// With `use_fallback_data` set the state is filled from `fallbacks` right here and no
	/// request is ever issued.
	pub fn new(
		sales: SalesSource,
		analytics: AnalyticsSource,
		query: SalesQuery,
		fallbacks: CampaignFallbacks,
		use_fallback_data: bool,
	) -> Self {
		let hook = Self {
			sales,
			analytics,
			query,
			fallbacks,
			use_fallback_data,
			core: HookCore::new(CampaignData::pending()),
		};

		if use_fallback_data {
			hook.core.update(|state| hook.serve_offline(state));
		}

		hook
	}

	/// Sales view this hook requests.
	pub fn query(&self) -> &SalesQuery {
		&self.query
	}

	/// Current state.
	pub fn data(&self) -> CampaignData {
		self.core.snapshot()
	}

	/// Initial load; identical to [`refresh_data`](Self::refresh_data).
	pub async fn load(&self) -> CampaignData {
		self.refresh_data().await
	}

	/// Re-fetches sales and analytics concurrently, keeping the displayed data until the new
	/// results are in.
	pub async fn refresh_data(&self) -> CampaignData {
		let _exclusive = self.core.exclusive().await;

		if self.use_fallback_data {
			self.core.update(|state| self.serve_offline(state));

			return self.data();
		}

		self.core.update(|state| state.loading = true);

		let (sales, analytics) =
			tokio::join!(self.sales.query(&self.query), self.analytics.get_overview());

		self.core.update(|state| {
			let mut errors = Vec::new();

			shared::settle(
				Platform::Sales,
				sales,
				self.fallbacks.sales.as_ref(),
				&mut state.sales_data,
				&mut errors,
			);
			shared::settle(
				Platform::Analytics,
				analytics,
				self.fallbacks.analytics.as_ref(),
				&mut state.analytics_data,
				&mut errors,
			);

			state.error = shared::join_errors(errors);
			state.loading = false;
		});

		self.data()
	}

	/// Detaches the hook; results that arrive afterwards are dropped.
	pub fn unmount(&self) {
		self.core.unmount();
	}

	/// Returns `false` once [`unmount`](Self::unmount) was called.
	pub fn is_mounted(&self) -> bool {
		self.core.is_mounted()
	}

	fn serve_offline(&self, state: &mut CampaignData) {
		let mut errors = Vec::new();

		shared::serve_offline(
			Platform::Sales,
			self.fallbacks.sales.as_ref(),
			&mut state.sales_data,
			&mut errors,
		);
		shared::serve_offline(
			Platform::Analytics,
			self.fallbacks.analytics.as_ref(),
			&mut state.analytics_data,
			&mut errors,
		);

		state.error = shared::join_errors(errors);
		state.loading = false;
	}
}
