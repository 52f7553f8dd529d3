//! Postgres-backed doctor store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | PoolTimedOut / PoolClosed / Io / Tls | `Unavailable` | Database unreachable |
//! | ColumnDecode / Decode / ColumnNotFound | `Decode` | Row does not match the schema |
//! | Database / other | `Query` | Statement rejected |
//!
//! ## Ordering
//!
//! Names are compared with the `"C"` collation so sorting is byte-wise and
//! independent of the server locale. The `seq` column breaks ties in
//! insertion order.

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{instrument, Span};

use doctor_listing_core::{Doctor, DoctorFilter, DoctorId, DoctorPage, NewDoctor, Pagination};

use super::{DoctorStore, StoreError};

const MAX_CONNECTIONS: u32 = 10;

/// Postgres-backed doctor store.
///
/// `PgPool` is internally reference-counted, so cloning the store is cheap
/// and shares the pool.
#[derive(Debug, Clone)]
pub struct PostgresDoctorStore {
    pool: PgPool,
}

impl PostgresDoctorStore {
    /// Create a store on top of an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `doctors` table and its lookup index if they do not exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS doctors (
                id          UUID PRIMARY KEY,
                seq         BIGSERIAL NOT NULL,
                name        TEXT NOT NULL CHECK (name <> ''),
                specialty   TEXT NOT NULL CHECK (specialty <> ''),
                rating      DOUBLE PRECISION NOT NULL CHECK (rating >= 0 AND rating <= 5),
                available   BOOLEAN NOT NULL,
                location    TEXT NOT NULL CHECK (location <> '')
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_table", e))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS doctors_name_seq_idx
            ON doctors (name COLLATE "C", seq)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_index", e))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DoctorStore for PostgresDoctorStore {
    #[instrument(skip(self, doctor), fields(specialty = %doctor.specialty), err)]
    async fn insert(&self, doctor: NewDoctor) -> Result<Doctor, StoreError> {
        let doctor = Doctor::from_new(DoctorId::new(), doctor);

        sqlx::query(
            r#"
            INSERT INTO doctors (id, name, specialty, rating, available, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(doctor.id.as_uuid())
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(doctor.rating)
        .bind(doctor.available)
        .bind(&doctor.location)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_doctor", e))?;

        Ok(doctor)
    }

    #[instrument(
        skip(self),
        fields(page = pagination.page, limit = ?pagination.limit, result_count = tracing::field::Empty),
        err
    )]
    async fn list(
        &self,
        filter: &DoctorFilter,
        pagination: Pagination,
    ) -> Result<DoctorPage, StoreError> {
        let specialty = filter.specialty.as_deref();
        let location = filter.location.as_deref();

        let total: i64 = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM doctors
            WHERE ($1::text IS NULL OR specialty = $1)
                AND ($2::text IS NULL OR location = $2)
            "#,
        )
        .bind(specialty)
        .bind(location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("count_doctors", e))?
        .try_get("total")
        .map_err(|e| map_sqlx_error("count_doctors", e))?;

        // LIMIT NULL is "no limit" in Postgres.
        let limit: Option<i64> = pagination.limit.map(clamp_i64);
        let offset = clamp_i64(pagination.offset());

        let rows = sqlx::query(
            r#"
            SELECT id, name, specialty, rating, available, location
            FROM doctors
            WHERE ($1::text IS NULL OR specialty = $1)
                AND ($2::text IS NULL OR location = $2)
            ORDER BY name COLLATE "C" ASC, seq ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(specialty)
        .bind(location)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_doctors", e))?;

        let doctors = rows
            .iter()
            .map(doctor_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_doctors", e))?;

        Span::current().record("result_count", doctors.len());

        Ok(DoctorPage {
            doctors,
            total: total.max(0) as u64,
        })
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}

fn clamp_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn doctor_from_row(row: &PgRow) -> Result<Doctor, sqlx::Error> {
    let id: uuid::Uuid = row.try_get("id")?;
    Ok(Doctor {
        id: DoctorId::from_uuid(id),
        name: row.try_get("name")?,
        specialty: row.try_get("specialty")?,
        rating: row.try_get("rating")?,
        available: row.try_get("available")?,
        location: row.try_get("location")?,
    })
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => StoreError::Query(format!(
            "database error in {operation}: {}",
            db_err.message()
        )),
        _ => StoreError::Query(format!("sqlx error in {operation}: {err}")),
    }
}
