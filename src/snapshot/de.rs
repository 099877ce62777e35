//! Field-level serde helpers shared by every platform schema.
//!
//! Upstream platforms disagree on number encoding (`"245.67"` vs `245.67`) and often send
//! `null` or nothing at all. Every numeric field funnels through these helpers so a missing
//! or null value becomes zero, while a value that is present but not numeric is still a
//! parse failure.

// crates.io
use serde::{Deserializer, Serializer, de::Error as _, ser::Error as _};
use time::format_description::well_known::Rfc3339;
// self
use crate::_prelude::*;

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
	Number(f64),
	Text(String),
}
impl Lenient {
	fn into_f64<E>(self) -> Result<f64, E>
	where
		E: serde::de::Error,
	{
		match self {
			Lenient::Number(n) => Ok(n),
			Lenient::Text(s) if s.trim().is_empty() => Ok(0.),
			Lenient::Text(s) => s
				.trim()
				.parse::<f64>()
				.map_err(|_| E::custom(format!("expected a number, found `{s}`"))),
		}
	}
}

/// Non-negative count; `null`, missing, and `""` become `0`.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	let Some(raw) = Option::<Lenient>::deserialize(deserializer)? else {
		return Ok(0);
	};
	let n = raw.into_f64::<D::Error>()?;

	if !n.is_finite() || n < 0. {
		return Err(D::Error::custom(format!("expected a non-negative count, found {n}")));
	}

	Ok(n.round() as u64)
}

/// Real-valued metric (rate, amount, average); `null`, missing, and `""` become `0.0`.
pub(crate) fn metric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Lenient>::deserialize(deserializer)? {
		Some(raw) => raw.into_f64(),
		None => Ok(0.),
	}
}

/// Optional real-valued metric; only `null` and missing stay `None`.
pub(crate) fn optional_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<Lenient>::deserialize(deserializer)?.map(Lenient::into_f64::<D::Error>).transpose()
}

/// Free text; `null` becomes empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Nested object or list; `null` becomes the default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339 timestamp as sent by upstream; anything unparseable counts as absent.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?
		.and_then(|raw| OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()))
}

/// Serializes a timestamp as RFC 3339.
pub(crate) fn rfc3339<S>(at: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = at.format(&Rfc3339).map_err(S::Error::custom)?;

	serializer.serialize_str(&formatted)
}

/// Deserializes an RFC 3339 timestamp written by [`rfc3339`].
pub(crate) fn rfc3339_strict<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	OffsetDateTime::parse(&raw, &Rfc3339).map_err(D::Error::custom)
}
