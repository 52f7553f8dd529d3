//! Doctor record and write-time validation.
//!
//! Candidate records arrive as untyped JSON. [`NewDoctor::from_json`] checks
//! them field by field, in declaration order, and reports the first violated
//! constraint. Every persisted [`Doctor`] has passed through it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};
use crate::id::DoctorId;

/// Lowest accepted rating (inclusive).
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating (inclusive).
pub const MAX_RATING: f64 = 5.0;

const FIELDS: [&str; 5] = ["name", "specialty", "rating", "available", "location"];

/// A validated doctor profile that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    pub available: bool,
    pub location: String,
}

/// A persisted doctor profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    pub available: bool,
    pub location: String,
}

impl Doctor {
    pub fn from_new(id: DoctorId, new: NewDoctor) -> Self {
        Self {
            id,
            name: new.name,
            specialty: new.specialty,
            rating: new.rating,
            available: new.available,
            location: new.location,
        }
    }
}

impl NewDoctor {
    /// Validate an untyped candidate record.
    ///
    /// Numeric strings are accepted for `rating` and `"true"`/`"false"` for
    /// `available`; both are converted. Keys outside the five known fields
    /// are rejected once the known fields pass.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::validation("\"value\" must be of type object"))?;

        let name = required_string(obj, "name")?;
        let specialty = required_string(obj, "specialty")?;
        let rating = required_rating(obj, "rating")?;
        let available = required_bool(obj, "available")?;
        let location = required_string(obj, "location")?;

        if let Some(unknown) = obj.keys().find(|k| !FIELDS.contains(&k.as_str())) {
            return Err(DomainError::validation(format!("\"{unknown}\" is not allowed")));
        }

        Ok(Self {
            name,
            specialty,
            rating,
            available,
            location,
        })
    }
}

fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> DomainResult<&'a Value> {
    obj.get(field)
        .ok_or_else(|| DomainError::validation(format!("\"{field}\" is required")))
}

fn required_string(obj: &Map<String, Value>, field: &str) -> DomainResult<String> {
    match present(obj, field)? {
        Value::String(s) if s.is_empty() => Err(DomainError::validation(format!(
            "\"{field}\" is not allowed to be empty"
        ))),
        Value::String(s) => Ok(s.clone()),
        _ => Err(DomainError::validation(format!("\"{field}\" must be a string"))),
    }
}

fn required_rating(obj: &Map<String, Value>, field: &str) -> DomainResult<f64> {
    let rating = match present(obj, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|r| r.is_finite())
    .ok_or_else(|| DomainError::validation(format!("\"{field}\" must be a number")))?;

    if rating < MIN_RATING {
        return Err(DomainError::validation(format!(
            "\"{field}\" must be greater than or equal to {MIN_RATING}"
        )));
    }
    if rating > MAX_RATING {
        return Err(DomainError::validation(format!(
            "\"{field}\" must be less than or equal to {MAX_RATING}"
        )));
    }
    Ok(rating)
}

fn required_bool(obj: &Map<String, Value>, field: &str) -> DomainResult<bool> {
    match present(obj, field)? {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(DomainError::validation(format!("\"{field}\" must be a boolean"))),
    }
}
