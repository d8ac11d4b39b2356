use serde_json::{Number, Value};
use std::fmt::Debug;

/// A typed tag value or feature id.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Int(i64),
	Null,
	String(String),
	UInt(u64),
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			GeoValue::Int(i64::from(value))
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<usize> for GeoValue {
	fn from(value: usize) -> Self {
		GeoValue::UInt(value as u64)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl From<&Number> for GeoValue {
	fn from(value: &Number) -> Self {
		if let Some(v) = value.as_u64() {
			GeoValue::UInt(v)
		} else if let Some(v) = value.as_i64() {
			GeoValue::Int(v)
		} else {
			GeoValue::Double(value.as_f64().unwrap_or(f64::NAN))
		}
	}
}

/// Maps JSON scalars onto their typed counterpart. Arrays and objects have no tag
/// representation and are kept as their JSON text.
impl From<&Value> for GeoValue {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => GeoValue::Null,
			Value::Bool(v) => GeoValue::Bool(*v),
			Value::Number(v) => GeoValue::from(v),
			Value::String(v) => GeoValue::String(v.clone()),
			Value::Array(_) | Value::Object(_) => GeoValue::String(value.to_string()),
		}
	}
}

impl GeoValue {
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			GeoValue::Double(v) => Some(*v),
			GeoValue::Int(v) => Some(*v as f64),
			GeoValue::UInt(v) => Some(*v as f64),
			_ => None,
		}
	}
}
