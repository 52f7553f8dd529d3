use std::sync::RwLock;

use doctor_listing_core::{Doctor, DoctorFilter, DoctorId, DoctorPage, NewDoctor, Pagination};

use super::{DoctorStore, StoreError};

/// In-memory doctor store for tests/dev.
///
/// Records are kept in insertion order, which doubles as the tie-breaker
/// when names compare equal.
#[derive(Debug, Default)]
pub struct InMemoryDoctorStore {
    inner: RwLock<Vec<Doctor>>,
}

impl InMemoryDoctorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DoctorStore for InMemoryDoctorStore {
    async fn insert(&self, doctor: NewDoctor) -> Result<Doctor, StoreError> {
        let doctor = Doctor::from_new(DoctorId::new(), doctor);
        let mut records = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        records.push(doctor.clone());
        Ok(doctor)
    }

    async fn list(
        &self,
        filter: &DoctorFilter,
        pagination: Pagination,
    ) -> Result<DoctorPage, StoreError> {
        let records = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;

        let mut matching: Vec<&Doctor> = records.iter().filter(|d| filter.matches(d)).collect();
        // Stable sort keeps insertion order among equal names.
        matching.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        let total = matching.len() as u64;
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = pagination
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        let doctors = matching.into_iter().skip(skip).take(take).cloned().collect();
        Ok(DoctorPage { doctors, total })
    }

    fn kind(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_doctor(name: &str, specialty: &str, location: &str) -> NewDoctor {
        NewDoctor {
            name: name.to_string(),
            specialty: specialty.to_string(),
            rating: 4.0,
            available: true,
            location: location.to_string(),
        }
    }

    async fn seeded() -> InMemoryDoctorStore {
        let store = InMemoryDoctorStore::new();
        for (name, specialty, location) in [
            ("Zed", "cardiology", "Lisbon"),
            ("Amy", "dermatology", "Porto"),
            ("Mia", "cardiology", "Porto"),
            ("Bob", "cardiology", "Lisbon"),
        ] {
            store.insert(new_doctor(name, specialty, location)).await.unwrap();
        }
        store
    }

    fn names(page: &DoctorPage) -> Vec<&str> {
        page.doctors.iter().map(|d| d.name.as_str()).collect()
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = InMemoryDoctorStore::new();
        let a = store.insert(new_doctor("A", "x", "y")).await.unwrap();
        let b = store.insert(new_doctor("A", "x", "y")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn lists_sorted_by_name() {
        let store = seeded().await;
        let page = store.list(&DoctorFilter::default(), Pagination::default()).await.unwrap();
        assert_eq!(names(&page), vec!["Amy", "Bob", "Mia", "Zed"]);
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn filters_by_exact_match() {
        let store = seeded().await;
        let filter = DoctorFilter::new(Some("cardiology".into()), Some("Lisbon".into()));
        let page = store.list(&filter, Pagination::default()).await.unwrap();
        assert_eq!(names(&page), vec!["Bob", "Zed"]);

        let filter = DoctorFilter::new(Some("Cardiology".into()), None);
        let page = store.list(&filter, Pagination::default()).await.unwrap();
        assert!(page.doctors.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn total_ignores_pagination_window() {
        let store = seeded().await;
        let filter = DoctorFilter::new(Some("cardiology".into()), None);
        let pagination = Pagination::from_raw(Some("2"), Some("2"));
        let page = store.list(&filter, pagination).await.unwrap();
        assert_eq!(names(&page), vec!["Zed"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let store = seeded().await;
        let pagination = Pagination::from_raw(Some("9"), Some("10"));
        let page = store.list(&DoctorFilter::default(), pagination).await.unwrap();
        assert!(page.doctors.is_empty());
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn equal_names_keep_insertion_order() {
        let store = InMemoryDoctorStore::new();
        let first = store.insert(new_doctor("Same", "a", "x")).await.unwrap();
        let second = store.insert(new_doctor("Same", "b", "x")).await.unwrap();
        let page = store.list(&DoctorFilter::default(), Pagination::default()).await.unwrap();
        assert_eq!(page.doctors[0].id, first.id);
        assert_eq!(page.doctors[1].id, second.id);
    }
}
