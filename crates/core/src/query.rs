//! Listing query: equality filters, pagination and result page.

use serde::{Deserialize, Serialize};

use crate::doctor::Doctor;

/// Default page number (1-based).
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u64 = 10;

/// Exact-match filter. `None` leaves the field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorFilter {
    pub specialty: Option<String>,
    pub location: Option<String>,
}

impl DoctorFilter {
    /// Build a filter from raw query values; empty strings count as absent.
    pub fn new(specialty: Option<String>, location: Option<String>) -> Self {
        Self {
            specialty: specialty.filter(|s| !s.is_empty()),
            location: location.filter(|s| !s.is_empty()),
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        self.specialty.as_deref().is_none_or(|s| doctor.specialty == s)
            && self.location.as_deref().is_none_or(|l| doctor.location == l)
    }
}

/// Page window over the name-sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    /// Page size; `None` means no limit.
    pub limit: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl Pagination {
    /// Normalize raw query-string values.
    ///
    /// Each value is read as its leading integer (`"2.5"` is 2, `"3abc"` is 3)
    /// and saturates at the `i64` range. Values without a leading integer
    /// fall back to the defaults, pages below 1 become 1, a zero limit means
    /// "no limit" and a negative limit uses its magnitude.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(leading_int)
            .map(|p| p.max(1) as u64)
            .unwrap_or(DEFAULT_PAGE);

        let limit = match limit.and_then(leading_int) {
            None => Some(DEFAULT_LIMIT),
            Some(0) => None,
            Some(l) => Some(l.unsigned_abs()),
        };

        Self { page, limit }
    }

    /// Number of matching records to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        match self.limit {
            Some(limit) => (self.page - 1).saturating_mul(limit),
            None => 0,
        }
    }
}

/// Leading decimal integer of `raw`, after optional whitespace and sign.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// One page of listing results plus the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorPage {
    pub doctors: Vec<Doctor>,
    /// Count of all records matching the filter, ignoring pagination.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DoctorId;

    fn doctor(specialty: &str, location: &str) -> Doctor {
        Doctor {
            id: DoctorId::new(),
            name: "Dr. X".into(),
            specialty: specialty.into(),
            rating: 3.0,
            available: true,
            location: location.into(),
        }
    }

    #[test]
    fn defaults_apply_when_absent_or_garbage() {
        assert_eq!(Pagination::from_raw(None, None), Pagination::default());
        assert_eq!(Pagination::from_raw(Some("abc"), Some("ten")), Pagination::default());
    }

    #[test]
    fn normalizes_out_of_range_values() {
        let p = Pagination::from_raw(Some("-3"), Some("-5"));
        assert_eq!(p, Pagination { page: 1, limit: Some(5) });

        let p = Pagination::from_raw(Some("4"), Some("0"));
        assert_eq!(p.limit, None);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn reads_leading_integer_like_parse_int() {
        assert_eq!(Pagination::from_raw(None, Some("2.5")).limit, Some(2));
        assert_eq!(Pagination::from_raw(None, Some("3abc")).limit, Some(3));
        assert_eq!(Pagination::from_raw(Some(" 4 "), None).page, 4);
        assert_eq!(Pagination::from_raw(Some("+2"), None).page, 2);
        assert_eq!(Pagination::from_raw(Some("-"), Some(".5")), Pagination::default());
    }

    #[test]
    fn oversized_values_saturate_instead_of_resetting() {
        let p = Pagination::from_raw(Some("99999999999999999999"), Some("2"));
        assert_eq!(p.page, i64::MAX as u64);
        assert_eq!(p.offset(), (i64::MAX as u64 - 1) * 2);

        let p = Pagination::from_raw(None, Some("-99999999999999999999"));
        assert_eq!(p.limit, Some(i64::MAX as u64));
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let p = Pagination::from_raw(Some("3"), Some("20"));
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn empty_filter_values_are_unconstrained() {
        let f = DoctorFilter::new(Some(String::new()), Some("Paris".into()));
        assert_eq!(f.specialty, None);
        assert!(f.matches(&doctor("anything", "Paris")));
        assert!(!f.matches(&doctor("anything", "paris")));
    }
}
