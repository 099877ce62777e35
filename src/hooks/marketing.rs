//! Email + social overview hook.

// self
use crate::{
	_prelude::*,
	fallback,
	hooks::shared::{self, HookCore},
	snapshot::{EmailSnapshot, SocialSnapshot, Sourced},
	sources::{EmailSource, Platform, SocialSource},
};

/// Published state of a [`MarketingHook`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingData {
	/// Email campaign overview.
	pub email_data: Option<Sourced<EmailSnapshot>>,
	/// Social ad overview.
	pub social_data: Option<Sourced<SocialSnapshot>>,
	/// True while a load or refresh is in flight.
	pub loading: bool,
	/// Failures that had no fallback.
	pub error: Option<String>,
}
impl MarketingData {
	fn pending() -> Self {
		Self { email_data: None, social_data: None, loading: true, error: None }
	}
}

/// Per-call fallbacks for [`MarketingHook`]; `None` surfaces the failure instead.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketingFallbacks {
	/// Substitute for a failed email overview.
	pub email: Option<EmailSnapshot>,
	/// Substitute for a failed social overview.
	pub social: Option<SocialSnapshot>,
}
impl MarketingFallbacks {
	/// No fallbacks at all.
	pub fn none() -> Self {
		Self { email: None, social: None }
	}
}
impl Default for MarketingFallbacks {
	fn default() -> Self {
		Self { email: Some(fallback::email()), social: Some(fallback::social()) }
	}
}

/// Loads the email and social overviews side by side.
#[derive(Debug)]
pub struct MarketingHook {
	email: EmailSource,
	social: SocialSource,
	fallbacks: MarketingFallbacks,
	use_fallback_data: bool,
	core: HookCore<MarketingData>,
}
impl MarketingHook {
	/// Creates the hook.
	///
	/// With `use_fallback_data` set the state is filled from `fallbacks` right here and no
	/// request is ever issued.
	pub fn new(
		email: EmailSource,
		social: SocialSource,
		fallbacks: MarketingFallbacks,
		use_fallback_data: bool,
	) -> Self {
		let hook = Self {
			email,
			social,
			fallbacks,
			use_fallback_data,
			core: HookCore::new(MarketingData::pending()),
		};

		if use_fallback_data {
			hook.core.update(|state| hook.serve_offline(state));
		}

		hook
	}

	/// Current state.
	pub fn data(&self) -> MarketingData {
		self.core.snapshot()
	}

	/// Initial load; identical to [`refresh_data`](Self::refresh_data).
	pub async fn load(&self) -> MarketingData {
		self.refresh_data().await
	}

	/// Re-fetches both overviews concurrently, keeping the displayed data until the new
	/// results are in.
	pub async fn refresh_data(&self) -> MarketingData {
		let _exclusive = self.core.exclusive().await;

		if self.use_fallback_data {
			self.core.update(|state| self.serve_offline(state));

			return self.data();
		}

		self.core.update(|state| state.loading = true);

		let (email, social) = tokio::join!(self.email.get_overview(), self.social.get_overview());

		self.core.update(|state| {
			let mut errors = Vec::new();

			shared::settle(
				Platform::Email,
				email,
				self.fallbacks.email.as_ref(),
				&mut state.email_data,
				&mut errors,
			);
			shared::settle(
				Platform::Social,
				social,
				self.fallbacks.social.as_ref(),
				&mut state.social_data,
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

	fn serve_offline(&self, state: &mut MarketingData) {
		let mut errors = Vec::new();

		shared::serve_offline(
			Platform::Email,
			self.fallbacks.email.as_ref(),
			&mut state.email_data,
			&mut errors,
		);
		shared::serve_offline(
			Platform::Social,
			self.fallbacks.social.as_ref(),
			&mut state.social_data,
			&mut errors,
		);

		state.error = shared::join_errors(errors);
		state.loading = false;
	}
}
