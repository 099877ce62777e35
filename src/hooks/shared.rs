// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{
	_prelude::*,
	obs::{self, FetchOutcome},
	snapshot::Sourced,
	sources::Platform,
};

/// State cell shared by every hook: the published state, the mount flag, and the refresh
/// guard.
pub(crate) struct HookCore<S> {
	state: RwLock<S>,
	mounted: AtomicBool,
	refresh: AsyncMutex<()>,
}
impl<S> HookCore<S>
where
	S: Clone,
{
	pub(crate) fn new(initial: S) -> Self {
		Self { state: RwLock::new(initial), mounted: AtomicBool::new(true), refresh: AsyncMutex::new(()) }
	}

	pub(crate) fn snapshot(&self) -> S {
		self.state.read().clone()
	}

	/// Applies `f` to the state unless the hook has been unmounted.
	pub(crate) fn update<F>(&self, f: F) -> bool
	where
		F: FnOnce(&mut S),
	{
		if !self.is_mounted() {
			return false;
		}

		f(&mut self.state.write());

		true
	}

	pub(crate) fn unmount(&self) {
		self.mounted.store(false, Ordering::SeqCst);
	}

	pub(crate) fn is_mounted(&self) -> bool {
		self.mounted.load(Ordering::SeqCst)
	}

	pub(crate) async fn exclusive(&self) -> async_lock::MutexGuard<'_, ()> {
		self.refresh.lock().await
	}
}
impl<S> Debug for HookCore<S>
where
	S: Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HookCore")
			.field("state", &*self.state.read())
			.field("mounted", &self.mounted.load(Ordering::SeqCst))
			.finish()
	}
}

/// Folds one settled call into its slot.
///
/// Success replaces the slot with live data. Failure substitutes the fallback when one is
/// configured; otherwise the previous value stays and the message lands in `errors`.
pub(crate) fn settle<T>(
	platform: Platform,
	result: Result<T>,
	fallback: Option<&T>,
	slot: &mut Option<Sourced<T>>,
	errors: &mut Vec<String>,
) where
	T: Clone,
{
	match result {
		Ok(snapshot) => {
			obs::record_fetch_outcome(platform, FetchOutcome::Live);

			*slot = Some(Sourced::Live(snapshot));
		},
		Err(e) => match fallback {
			Some(fallback) => {
				obs::warn_fallback(platform, &e);
				obs::record_fetch_outcome(platform, FetchOutcome::Fallback);

				*slot = Some(Sourced::Fallback(fallback.clone()));
			},
			None => {
				obs::warn_fetch_failed(platform, &e);
				obs::record_fetch_outcome(platform, FetchOutcome::Failed);

				errors.push(format!("{platform}: {e}"));
			},
		},
	}
}

/// Fills a slot from its fallback without touching the network.
pub(crate) fn serve_offline<T>(
	platform: Platform,
	fallback: Option<&T>,
	slot: &mut Option<Sourced<T>>,
	errors: &mut Vec<String>,
) where
	T: Clone,
{
	obs::record_fetch_outcome(platform, FetchOutcome::Offline);

	match fallback {
		Some(fallback) => *slot = Some(Sourced::Fallback(fallback.clone())),
		None => errors.push(format!("{platform}: fallback data is enabled but none is configured")),
	}
}

/// Joins collected messages into the hook-level error string.
pub(crate) fn join_errors(errors: Vec<String>) -> Option<String> {
	(!errors.is_empty()).then(|| errors.join("; "))
}
