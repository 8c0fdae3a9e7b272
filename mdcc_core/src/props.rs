use std::collections::BTreeMap;

use derive_more::Deref;
use serde::Serialize;
use serde_json::Value;

use crate::MdccError;
use crate::MdccResult;

/// A single property value attached to a replacement element.
///
/// The attribute syntax only ever yields strings and `true` flags, while the
/// JSON syntax may produce any JSON value. Both are covered by this closed
/// set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum PropValue {
	/// `null`
	Null,
	/// `true`, `false`, or a bare attribute flag.
	Bool(bool),
	/// Any JSON number, kept at the precision it was written with.
	Number(serde_json::Number),
	/// A quoted or unquoted attribute value, or a JSON string.
	String(String),
	/// A JSON array.
	List(Vec<PropValue>),
	/// A JSON object, ordered by key.
	Map(BTreeMap<String, PropValue>),
}

impl PropValue {
	/// Returns the string slice if this is a [`PropValue::String`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}
}

impl From<Value> for PropValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(flag) => Self::Bool(flag),
			Value::Number(number) => Self::Number(number),
			Value::String(string) => Self::String(string),
			Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
			Value::Object(map) => {
				Self::Map(
					map.into_iter()
						.map(|(key, value)| (key, Self::from(value)))
						.collect(),
				)
			}
		}
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

/// The property set of a replacement element.
///
/// Read-only once built: use [`PropsBuilder`] or
/// [`Props::from_json_object`] to create one. Serializes as a plain JSON
/// object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deref)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
	/// Start building a property set.
	pub fn builder() -> PropsBuilder {
		PropsBuilder::default()
	}

	/// Parse a brace-delimited JSON object literal, e.g. `{"type": "primary"}`.
	///
	/// `component` is only used to label the error.
	pub fn from_json_object(component: &str, source: &str) -> MdccResult<Self> {
		let map: serde_json::Map<String, Value> =
			serde_json::from_str(source).map_err(|e| {
				MdccError::InvalidProps {
					name: component.to_string(),
					reason: e.to_string(),
				}
			})?;

		let mut builder = Self::builder();
		for (key, value) in map {
			builder.insert(key, value);
		}

		Ok(builder.build())
	}
}

/// Accumulates properties one at a time. Inserting a key that already exists
/// replaces the earlier value.
#[derive(Debug, Default)]
pub struct PropsBuilder {
	entries: BTreeMap<String, PropValue>,
}

impl PropsBuilder {
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> &mut Self {
		self.entries.insert(key.into(), value.into());
		self
	}

	pub fn build(self) -> Props {
		Props(self.entries)
	}
}
