use axum::http::StatusCode;
use serde_json::Value;

use doctor_listing_core::{Doctor, DoctorFilter, DoctorPage, Pagination};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Raw listing query. Everything stays a string so malformed numbers reach
/// [`Pagination::from_raw`] instead of failing extraction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListDoctorsQuery {
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListDoctorsQuery {
    /// Build from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "specialty" => &mut query.specialty,
                "location" => &mut query.location,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn filter(&self) -> DoctorFilter {
        DoctorFilter::new(self.specialty.clone(), self.location.clone())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Parse a request body as untyped JSON; an empty body reads as `{}`.
pub fn parse_json_body(body: &[u8]) -> Result<Value, axum::response::Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}"))
    })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn doctor_to_json(d: Doctor) -> Value {
    serde_json::json!({
        "id": d.id.to_string(),
        "name": d.name,
        "specialty": d.specialty,
        "rating": d.rating,
        "available": d.available,
        "location": d.location,
    })
}

pub fn page_to_json(page: DoctorPage) -> Value {
    serde_json::json!({
        "doctors": page.doctors.into_iter().map(doctor_to_json).collect::<Vec<_>>(),
        "total": page.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_reads_as_empty_object() {
        assert_eq!(parse_json_body(b"").unwrap(), serde_json::json!({}));
        assert_eq!(parse_json_body(b" \n").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn malformed_body_is_a_client_error() {
        let resp = parse_json_body(b"{\"name\":").unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repeated_query_keys_keep_the_first_value() {
        let pairs = vec![
            ("specialty".to_string(), "a".to_string()),
            ("specialty".to_string(), "b".to_string()),
            ("sort".to_string(), "name".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        let q = ListDoctorsQuery::from_pairs(pairs);
        assert_eq!(q.specialty.as_deref(), Some("a"));
        assert_eq!(q.limit.as_deref(), Some("5"));
        assert_eq!(q.location, None);
    }

    #[test]
    fn query_defaults_when_empty() {
        let q = ListDoctorsQuery::default();
        assert_eq!(q.filter(), DoctorFilter::default());
        assert_eq!(q.pagination(), Pagination::default());
    }
}
