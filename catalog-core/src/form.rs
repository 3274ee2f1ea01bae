//! Raw `application/x-www-form-urlencoded` request bodies.
//!
//! HTML forms may send a field zero, one or many times (a multi-select sends
//! one pair per selected option), so fields are kept as ordered value lists
//! rather than deserialized into a fixed struct.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use crate::error::HttpError;

/// The submitted value(s) of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Absent,
    One(String),
    Many(Vec<String>),
}

impl FieldValue {
    /// Coerce a possibly-repeated field into a list:
    /// absent → `[]`, single scalar → `[x]`, list → unchanged.
    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Absent => Vec::new(),
            FieldValue::One(v) => vec![v],
            FieldValue::Many(values) => values,
        }
    }

    /// The scalar form of the field; for a repeated field the first value wins.
    pub fn into_scalar(self) -> Option<String> {
        match self {
            FieldValue::Absent => None,
            FieldValue::One(v) => Some(v),
            FieldValue::Many(values) => values.into_iter().next(),
        }
    }
}

/// Decoded form body preserving field order and repetition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        let pairs = form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// All values of `name`, in submission order, shaped as a [`FieldValue`].
    pub fn value(&self, name: &str) -> FieldValue {
        let mut values: Vec<String> = self
            .pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .collect();
        match values.len() {
            0 => FieldValue::Absent,
            1 => FieldValue::One(values.remove(0)),
            _ => FieldValue::Many(values),
        }
    }

    /// Trimmed scalar value; an absent field reads as `""`.
    pub fn text(&self, name: &str) -> String {
        self.value(name)
            .into_scalar()
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed list value, with a single scalar coerced to a one-element list.
    pub fn texts(&self, name: &str) -> Vec<String> {
        self.value(name)
            .into_list()
            .into_iter()
            .map(|v| v.trim().to_string())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| HttpError::BadRequest(format!("unreadable form body: {e}")))?;
        Ok(FormData::parse(&body))
    }
}
