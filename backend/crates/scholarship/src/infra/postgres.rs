//! PostgreSQL Document Store
//!
//! Every collection is a table of `(id UUID, doc JSONB)`. Each route maps to
//! a single statement against one of them.

use auth::domain::Email;
use kernel::id::{ApplicationId, ReviewId, ScholarshipId};
use kernel::page::Pagination;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{Payment, Review, Scholarship, ScholarshipApplication};
use crate::domain::repository::{
    ApplicationRepository, PaymentRepository, ReviewRepository, ScholarshipRepository,
};
use crate::domain::services::search_pattern;
use crate::domain::value_objects::ApplicationStatus;
use crate::error::{ScholarshipError, ScholarshipResult};

/// PostgreSQL-backed document store
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert<T: Serialize + Sync>(
        &self,
        collection: Collection,
        id: &Uuid,
        doc: &T,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2)",
            collection.table()
        ))
        .bind(id)
        .bind(Json(doc))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find<T: DeserializeOwned + Send + Unpin + 'static>(
        &self,
        collection: Collection,
        id: &Uuid,
    ) -> ScholarshipResult<Option<T>> {
        let doc = sqlx::query_scalar::<_, Json<T>>(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            collection.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc.map(|Json(doc)| doc))
    }

    async fn replace<T: Serialize + Sync>(
        &self,
        collection: Collection,
        id: &Uuid,
        doc: &T,
    ) -> ScholarshipResult<bool> {
        let updated = sqlx::query(&format!(
            "UPDATE {} SET doc = $2 WHERE id = $1",
            collection.table()
        ))
        .bind(id)
        .bind(Json(doc))
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn remove(&self, collection: Collection, id: &Uuid) -> ScholarshipResult<bool> {
        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", collection.table()))
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Scholarships,
    Applications,
    Reviews,
    Payments,
}

impl Collection {
    const fn table(self) -> &'static str {
        match self {
            Collection::Scholarships => "scholarships",
            Collection::Applications => "applications",
            Collection::Reviews => "reviews",
            Collection::Payments => "payments",
        }
    }
}

fn into_docs<T>(rows: Vec<Json<T>>) -> Vec<T> {
    rows.into_iter().map(|Json(doc)| doc).collect()
}

// ============================================================================
// Scholarships
// ============================================================================

const SEARCH_FILTER: &str = r#"
    ($1::TEXT IS NULL
        OR doc->>'scholarshipName' ILIKE $1
        OR doc->>'universityName' ILIKE $1
        OR doc->>'degree' ILIKE $1)
"#;

impl ScholarshipRepository for PgDocumentStore {
    async fn create(&self, scholarship: &Scholarship) -> ScholarshipResult<()> {
        self.insert(Collection::Scholarships, scholarship.id.as_uuid(), scholarship)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ScholarshipId) -> ScholarshipResult<Option<Scholarship>> {
        self.find(Collection::Scholarships, id.as_uuid()).await
    }

    async fn featured(&self, limit: u32) -> ScholarshipResult<Vec<Scholarship>> {
        let rows = sqlx::query_scalar::<_, Json<Scholarship>>(
            r#"
            SELECT doc
            FROM scholarships
            ORDER BY
                (doc->>'applicationFees')::FLOAT8 ASC,
                (doc->>'postDate')::TIMESTAMPTZ DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn search(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> ScholarshipResult<(Vec<Scholarship>, u64)> {
        let pattern = search_pattern(search);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM scholarships WHERE {SEARCH_FILTER}"
        ))
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_scalar::<_, Json<Scholarship>>(&format!(
            r#"
            SELECT doc
            FROM scholarships
            WHERE {SEARCH_FILTER}
            ORDER BY (doc->>'postDate')::TIMESTAMPTZ DESC
            OFFSET $2
            LIMIT $3
            "#
        ))
        .bind(pattern.as_deref())
        .bind(i64::try_from(pagination.skip()).unwrap_or(i64::MAX))
        .bind(i64::try_from(pagination.limit()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok((into_docs(rows), u64::try_from(total).unwrap_or_default()))
    }

    async fn update(&self, scholarship: &Scholarship) -> ScholarshipResult<bool> {
        self.replace(Collection::Scholarships, scholarship.id.as_uuid(), scholarship)
            .await
    }

    async fn delete(&self, id: &ScholarshipId) -> ScholarshipResult<bool> {
        self.remove(Collection::Scholarships, id.as_uuid()).await
    }
}

// ============================================================================
// Applications
// ============================================================================

impl ApplicationRepository for PgDocumentStore {
    async fn create(&self, application: &ScholarshipApplication) -> ScholarshipResult<()> {
        // Backed by the unique (userEmail, scholarshipId) index
        match self
            .insert(Collection::Applications, application.id.as_uuid(), application)
            .await
        {
            Ok(()) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ScholarshipError::AlreadyApplied)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &ApplicationId) -> ScholarshipResult<Option<ScholarshipApplication>> {
        self.find(Collection::Applications, id.as_uuid()).await
    }

    async fn find_by_user_and_scholarship(
        &self,
        user_email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<ScholarshipApplication>> {
        let doc = sqlx::query_scalar::<_, Json<ScholarshipApplication>>(
            r#"
            SELECT doc
            FROM applications
            WHERE doc->>'userEmail' = $1 AND doc->>'scholarshipId' = $2
            "#,
        )
        .bind(user_email.as_str())
        .bind(scholarship_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc.map(|Json(doc)| doc))
    }

    async fn list_by_user(&self, user_email: &Email) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        let rows = sqlx::query_scalar::<_, Json<ScholarshipApplication>>(
            r#"
            SELECT doc
            FROM applications
            WHERE doc->>'userEmail' = $1
            ORDER BY (doc->>'appliedAt')::TIMESTAMPTZ DESC
            "#,
        )
        .bind(user_email.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> ScholarshipResult<Vec<ScholarshipApplication>> {
        let rows = sqlx::query_scalar::<_, Json<ScholarshipApplication>>(
            r#"
            SELECT doc
            FROM applications
            WHERE ($1::TEXT IS NULL OR doc->>'status' = $1)
            ORDER BY (doc->>'appliedAt')::TIMESTAMPTZ DESC
            "#,
        )
        .bind(status.map(|s| s.to_string()))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn update(&self, application: &ScholarshipApplication) -> ScholarshipResult<bool> {
        self.replace(Collection::Applications, application.id.as_uuid(), application)
            .await
    }

    async fn delete(&self, id: &ApplicationId) -> ScholarshipResult<bool> {
        self.remove(Collection::Applications, id.as_uuid()).await
    }
}

// ============================================================================
// Reviews
// ============================================================================

impl ReviewRepository for PgDocumentStore {
    async fn create(&self, review: &Review) -> ScholarshipResult<()> {
        self.insert(Collection::Reviews, review.id.as_uuid(), review).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> ScholarshipResult<Option<Review>> {
        self.find(Collection::Reviews, id.as_uuid()).await
    }

    async fn list_by_scholarship(&self, scholarship_id: &ScholarshipId) -> ScholarshipResult<Vec<Review>> {
        let rows = sqlx::query_scalar::<_, Json<Review>>(
            r#"
            SELECT doc
            FROM reviews
            WHERE doc->>'scholarshipId' = $1
            ORDER BY (doc->>'reviewDate')::TIMESTAMPTZ DESC
            "#,
        )
        .bind(scholarship_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn list_by_user(&self, user_email: &Email) -> ScholarshipResult<Vec<Review>> {
        let rows = sqlx::query_scalar::<_, Json<Review>>(
            r#"
            SELECT doc
            FROM reviews
            WHERE doc->>'userEmail' = $1
            ORDER BY (doc->>'reviewDate')::TIMESTAMPTZ DESC
            "#,
        )
        .bind(user_email.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn list(&self) -> ScholarshipResult<Vec<Review>> {
        let rows = sqlx::query_scalar::<_, Json<Review>>(
            "SELECT doc FROM reviews ORDER BY (doc->>'reviewDate')::TIMESTAMPTZ DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn update(&self, review: &Review) -> ScholarshipResult<bool> {
        self.replace(Collection::Reviews, review.id.as_uuid(), review).await
    }

    async fn delete(&self, id: &ReviewId) -> ScholarshipResult<bool> {
        self.remove(Collection::Reviews, id.as_uuid()).await
    }
}

// ============================================================================
// Payments
// ============================================================================

impl PaymentRepository for PgDocumentStore {
    async fn create(&self, payment: &Payment) -> ScholarshipResult<()> {
        self.insert(Collection::Payments, payment.id.as_uuid(), payment).await?;
        Ok(())
    }

    async fn list_by_email(&self, email: &Email) -> ScholarshipResult<Vec<Payment>> {
        let rows = sqlx::query_scalar::<_, Json<Payment>>(
            r#"
            SELECT doc
            FROM payments
            WHERE doc->>'email' = $1
            ORDER BY (doc->>'date')::TIMESTAMPTZ DESC
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_docs(rows))
    }

    async fn find_by_email_and_scholarship(
        &self,
        email: &Email,
        scholarship_id: &ScholarshipId,
    ) -> ScholarshipResult<Option<Payment>> {
        let doc = sqlx::query_scalar::<_, Json<Payment>>(
            r#"
            SELECT doc
            FROM payments
            WHERE doc->>'email' = $1 AND doc->>'scholarshipId' = $2
            ORDER BY (doc->>'date')::TIMESTAMPTZ DESC
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .bind(scholarship_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc.map(|Json(doc)| doc))
    }
}
