//! Strongly typed per-platform snapshots.
//!
//! Each platform has a public snapshot type plus a private wire schema. The wire schema
//! absorbs upstream quirks (string-encoded numbers, alternative field spellings, missing
//! timestamps) once, at the adapter boundary; the snapshot handed to callers always has
//! every field populated.

pub mod analytics;
pub mod email;
pub mod sales;
pub mod social;

pub(crate) mod de;

pub use analytics::*;
pub use email::*;
pub use sales::*;
pub use social::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Conversion from an upstream payload to a snapshot.
pub(crate) trait Schema
where
	Self: Sized,
{
	/// Raw shape accepted from the backend proxy.
	type Wire: DeserializeOwned;

	/// Normalizes `wire`, stamping `fetched_at` when upstream sent no timestamp.
	fn from_wire(wire: Self::Wire, fetched_at: OffsetDateTime) -> Self;
}

/// A snapshot together with where it came from.
///
/// Serialized as `{"kind": "live" | "fallback", "snapshot": {..}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "snapshot", rename_all = "snake_case")]
pub enum Sourced<T> {
	/// Retrieved from the backend proxy.
	Live(T),
	/// Substituted from the configured fallback.
	Fallback(T),
}
impl<T> Sourced<T> {
	/// Borrows the snapshot regardless of origin.
	pub fn snapshot(&self) -> &T {
		match self {
			Sourced::Live(snapshot) | Sourced::Fallback(snapshot) => snapshot,
		}
	}

	/// Unwraps the snapshot regardless of origin.
	pub fn into_snapshot(self) -> T {
		match self {
			Sourced::Live(snapshot) | Sourced::Fallback(snapshot) => snapshot,
		}
	}

	/// Returns `true` for fallback data.
	pub fn is_fallback(&self) -> bool {
		matches!(self, Sourced::Fallback(_))
	}

	/// Source label shown next to the data: `"live"` or `"fallback_data"`.
	pub const fn source_tag(&self) -> &'static str {
		match self {
			Sourced::Live(_) => "live",
			Sourced::Fallback(_) => "fallback_data",
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sourced_serializes_as_tagged_variant() {
		let live = serde_json::to_value(Sourced::Live(7)).expect("Sourced value should serialize.");
		let fallback =
			serde_json::to_value(Sourced::Fallback(7)).expect("Sourced value should serialize.");

		assert_eq!(live, serde_json::json!({ "kind": "live", "snapshot": 7 }));
		assert_eq!(fallback, serde_json::json!({ "kind": "fallback", "snapshot": 7 }));
		assert_eq!(Sourced::Fallback(()).source_tag(), "fallback_data");
		assert_eq!(Sourced::Live(()).source_tag(), "live");
		assert_eq!(*Sourced::Fallback(3).snapshot(), 3);
	}
}
