//! Expense entity and its wire representation

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ValidationError;

/// A single expense record.
///
/// `id` is assigned by storage; zero means "not yet stored". Fields missing
/// from a request body bind to their zero value, and a `null` tag list binds
/// to an empty one, so a stored record never has null tags. Capitalized field
/// names are accepted on input; output always uses the lowercase names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expense {
    #[serde(alias = "ID", alias = "Id")]
    pub id: i64,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Amount")]
    pub amount: f64,
    #[serde(alias = "Note")]
    pub note: String,
    #[serde(alias = "Tags", deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Expense {
    /// Bind a request body into an expense.
    ///
    /// An empty body or a bare `null` binds nothing and yields the zero value.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| ValidationError::payload(&e))
    }

    /// Bind the body of a create request.
    ///
    /// A non-zero integer `id` is rejected even when another field has the
    /// wrong type, as long as the body is well-formed JSON. Syntax errors keep
    /// the parser text.
    pub fn from_create_json(body: &[u8]) -> Result<Self, ValidationError> {
        match Self::from_json(body) {
            Ok(expense) => {
                expense.ensure_unassigned()?;
                Ok(expense)
            }
            Err(err) => match submitted_id(body) {
                Some(id) if id != 0 => Err(ValidationError::IdAssigned { id }),
                _ => Err(err),
            },
        }
    }

    /// Check that a create request did not try to choose its own id.
    pub fn ensure_unassigned(&self) -> Result<(), ValidationError> {
        if self.id != 0 {
            return Err(ValidationError::IdAssigned { id: self.id });
        }
        Ok(())
    }
}

/// Parse the `:id` path segment.
pub fn parse_path_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| ValidationError::PathId {
        raw: raw.to_owned(),
    })
}

/// Integer `id` of a well-formed JSON object body, matched case-insensitively.
fn submitted_id(body: &[u8]) -> Option<i64> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("id"))
        .and_then(|(_, id)| id.as_i64())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
