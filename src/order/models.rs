//! WooCommerce order payload, as much of it as the relay renders.
//!
//! Every field is optional; JSON `null` is treated as absent. Scalars are kept
//! loosely typed because WooCommerce mixes strings and numbers (`"total":
//! "150.75"` next to `"quantity": 2`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::formatter::FormatError;

/// A loosely typed scalar field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    /// Anything else (arrays, objects) rendered as compact JSON
    Other(Value),
}

impl Scalar {
    /// Empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s.trim()),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Billing {
    pub first_name: Option<Scalar>,
    pub last_name: Option<Scalar>,
    pub email: Option<Scalar>,
    pub phone: Option<Scalar>,
    pub address_1: Option<Scalar>,
    pub address_2: Option<Scalar>,
    pub city: Option<Scalar>,
    pub state: Option<Scalar>,
    pub postcode: Option<Scalar>,
    pub country: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: Option<Scalar>,
    pub quantity: Option<Scalar>,
    pub total: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRecord {
    pub id: Option<Scalar>,
    pub number: Option<Scalar>,
    pub date_created_gmt: Option<Scalar>,
    pub date_created: Option<Scalar>,
    pub currency_symbol: Option<Scalar>,
    pub total: Option<Scalar>,
    pub billing: Option<Billing>,
    pub line_items: Option<Vec<LineItem>>,
}

impl OrderRecord {
    /// Project a parsed webhook body onto the order shape.
    ///
    /// Unknown fields are ignored. Fails only when the value is not an object
    /// or a nested record has the wrong structure (e.g. `billing` is a string).
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        if !value.is_object() {
            return Err(FormatError::NotAnObject);
        }
        Self::deserialize(value).map_err(|e| FormatError::Malformed(e.to_string()))
    }
}

/// Whether a webhook body looks like an order: an object carrying an `id` key.
///
/// Only presence counts; the value itself may be anything, including `null`
/// or `0`. WooCommerce also posts non-order payloads (pings, other topics);
/// those carry no `id`.
pub fn is_order(value: &Value) -> bool {
    value.as_object().is_some_and(|o| o.contains_key("id"))
}
