//! Dynamically typed form values.
//!
//! Form fields hand the debugger whatever they hold: text, numbers, nothing at
//! all. [`ObservedValue`] models that with browser semantics for the type tag
//! and for stringification, since both end up in front of a developer.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A value observed in a form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObservedValue {
	/// No value was ever provided.
	#[default]
	Undefined,
	/// An explicit null.
	Null,
	/// A boolean.
	Bool(bool),
	/// Any number. Integers and floats share one representation.
	Number(f64),
	/// A string.
	String(String),
	/// A list of values.
	Array(Vec<ObservedValue>),
	/// A key/value object.
	Object(Map<String, Value>),
}

impl ObservedValue {
	/// Runtime type tag as a browser would report it.
	///
	/// `null`, arrays and objects all report `"object"`.
	pub fn type_tag(&self) -> &'static str {
		match self {
			ObservedValue::Undefined => "undefined",
			ObservedValue::Null | ObservedValue::Array(_) | ObservedValue::Object(_) => "object",
			ObservedValue::Bool(_) => "boolean",
			ObservedValue::Number(_) => "number",
			ObservedValue::String(_) => "string",
		}
	}

	/// The empty string, used as the default replacement value.
	pub fn empty_string() -> Self {
		ObservedValue::String(String::new())
	}

	/// Returns the string content for string values.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ObservedValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the number for number values.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			ObservedValue::Number(n) => Some(*n),
			_ => None,
		}
	}
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	if n.is_nan() {
		return f.write_str("NaN");
	}
	if n.is_infinite() {
		return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
	}
	if n == 0.0 {
		// Covers -0 as well.
		return f.write_str("0");
	}
	let magnitude = n.abs();
	if !(1e-6..1e21).contains(&magnitude) {
		let exponential = format!("{n:e}");
		return match exponential.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				write!(f, "{mantissa}e+{exponent}")
			}
			_ => f.write_str(&exponential),
		};
	}
	write!(f, "{n}")
}

impl fmt::Display for ObservedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ObservedValue::Undefined => f.write_str("undefined"),
			ObservedValue::Null => f.write_str("null"),
			ObservedValue::Bool(b) => write!(f, "{b}"),
			ObservedValue::Number(n) => format_number(*n, f),
			ObservedValue::String(s) => f.write_str(s),
			ObservedValue::Array(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					// Nested null and undefined stringify to nothing inside a list.
					match item {
						ObservedValue::Null | ObservedValue::Undefined => {}
						other => write!(f, "{other}")?,
					}
				}
				Ok(())
			}
			ObservedValue::Object(_) => f.write_str("[object Object]"),
		}
	}
}

impl Serialize for ObservedValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			ObservedValue::Undefined | ObservedValue::Null => serializer.serialize_none(),
			ObservedValue::Bool(b) => serializer.serialize_bool(*b),
			// Integral numbers stay integers on the wire, as in JSON.stringify.
			ObservedValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
				serializer.serialize_i64(*n as i64)
			}
			ObservedValue::Number(n) => serializer.serialize_f64(*n),
			ObservedValue::String(s) => serializer.serialize_str(s),
			ObservedValue::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			ObservedValue::Object(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

impl From<Value> for ObservedValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => ObservedValue::Null,
			Value::Bool(b) => ObservedValue::Bool(b),
			Value::Number(n) => n
				.as_f64()
				.map_or(ObservedValue::Null, ObservedValue::Number),
			Value::String(s) => ObservedValue::String(s),
			Value::Array(items) => {
				ObservedValue::Array(items.into_iter().map(ObservedValue::from).collect())
			}
			Value::Object(entries) => ObservedValue::Object(entries),
		}
	}
}

impl From<&str> for ObservedValue {
	fn from(value: &str) -> Self {
		ObservedValue::String(value.to_string())
	}
}

impl From<String> for ObservedValue {
	fn from(value: String) -> Self {
		ObservedValue::String(value)
	}
}

impl From<bool> for ObservedValue {
	fn from(value: bool) -> Self {
		ObservedValue::Bool(value)
	}
}

macro_rules! impl_from_number {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ObservedValue {
				fn from(value: $ty) -> Self {
					ObservedValue::Number(value as f64)
				}
			}
		)*
	};
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<ObservedValue>> From<Option<T>> for ObservedValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(ObservedValue::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(ObservedValue::Undefined, "undefined")]
	#[case(ObservedValue::Null, "object")]
	#[case(ObservedValue::from(true), "boolean")]
	#[case(ObservedValue::from(-1), "number")]
	#[case(ObservedValue::from("-1"), "string")]
	#[case(ObservedValue::from(json!([1, 2])), "object")]
	#[case(ObservedValue::from(json!({"a": 1})), "object")]
	fn test_type_tag(#[case] value: ObservedValue, #[case] expected: &str) {
		assert_eq!(value.type_tag(), expected);
	}

	#[rstest]
	#[case(ObservedValue::from(-1), "-1")]
	#[case(ObservedValue::from(-1.0), "-1")]
	#[case(ObservedValue::from(-0.0), "0")]
	#[case(ObservedValue::from(2.5), "2.5")]
	#[case(ObservedValue::from(f64::NAN), "NaN")]
	#[case(ObservedValue::from(f64::NEG_INFINITY), "-Infinity")]
	#[case(ObservedValue::from(1e20), "100000000000000000000")]
	#[case(ObservedValue::from(1e21), "1e+21")]
	#[case(ObservedValue::from(-1.5e25), "-1.5e+25")]
	#[case(ObservedValue::from(0.000001), "0.000001")]
	#[case(ObservedValue::from(1e-7), "1e-7")]
	#[case(ObservedValue::from(-2.5e-8), "-2.5e-8")]
	#[case(ObservedValue::from("-1.0"), "-1.0")]
	#[case(ObservedValue::Undefined, "undefined")]
	#[case(ObservedValue::Null, "null")]
	#[case(ObservedValue::from(false), "false")]
	#[case(ObservedValue::from(json!([1, null, "a"])), "1,,a")]
	#[case(ObservedValue::from(json!({"a": 1})), "[object Object]")]
	fn test_display_matches_browser_stringification(
		#[case] value: ObservedValue,
		#[case] expected: &str,
	) {
		assert_eq!(value.to_string(), expected);
	}

	#[rstest]
	fn test_option_conversion() {
		assert_eq!(ObservedValue::from(None::<i32>), ObservedValue::Null);
		assert_eq!(ObservedValue::from(Some(3)), ObservedValue::Number(3.0));
	}

	#[rstest]
	fn test_serialize_to_json() {
		let value = ObservedValue::Array(vec![
			ObservedValue::from(-1),
			ObservedValue::from(2.5),
			ObservedValue::from(json!({"qty": -1, "tags": ["a"]})),
		]);

		let encoded = serde_json::to_value(&value).unwrap();

		assert_eq!(encoded, json!([-1, 2.5, {"qty": -1, "tags": ["a"]}]));
		assert_eq!(
			serde_json::to_value(ObservedValue::Undefined).unwrap(),
			Value::Null
		);
	}
}
