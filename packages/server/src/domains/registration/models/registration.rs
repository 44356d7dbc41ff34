use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Page, PageRequest, RegistrationId};

/// Registration - one workshop submission awaiting (or past) payment review
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registration {
    pub id: RegistrationId,
    pub full_name: String,
    pub tp_number: String,
    pub sex: Sex,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub nationality: String,

    // Set once at intake, never rewritten
    pub receipt_path: String,

    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; `status` and `created_at` are assigned by the store
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub id: RegistrationId,
    pub full_name: String,
    pub tp_number: String,
    pub sex: Sex,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub receipt_path: String,
}

/// Review status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected have no outgoing transitions in normal operation.
    pub fn is_decided(&self) -> bool {
        !matches!(self, RegistrationStatus::Pending)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid registration status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(anyhow::anyhow!("Invalid sex: {}", s)),
        }
    }
}

// Both enums live in TEXT columns guarded by CHECK constraints.
macro_rules! text_column {
    ($ty:ty) => {
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <&'r str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                raw.parse::<$ty>().map_err(Into::into)
            }
        }
    };
}

text_column!(RegistrationStatus);
text_column!(Sex);

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Registration {
    /// Find registration by ID
    pub async fn find_by_id(id: RegistrationId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new registration in `pending` state
    pub async fn insert(new: &NewRegistration, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO registrations (
                id,
                full_name,
                tp_number,
                sex,
                age,
                email,
                phone,
                nationality,
                receipt_path,
                status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
             RETURNING *",
        )
        .bind(new.id)
        .bind(&new.full_name)
        .bind(&new.tp_number)
        .bind(new.sex)
        .bind(new.age)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.nationality)
        .bind(&new.receipt_path)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update review status
    ///
    /// Returns None if no row has this id.
    pub async fn update_status(
        id: RegistrationId,
        status: RegistrationStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE registrations
             SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Newest-first listing
    pub async fn find_page(request: &PageRequest, pool: &PgPool) -> Result<Page<Self>> {
        let after = request.after.map(|c| RegistrationId::from_uuid(c.into_uuid()));

        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM registrations
            WHERE $1::uuid IS NULL
               OR (created_at, id) < (
                    SELECT created_at, id FROM registrations WHERE id = $1
               )
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(after)
        .bind(request.fetch_limit())
        .fetch_all(pool)
        .await?;

        Ok(Page::from_fetched(rows, request, |r| r.id.into_uuid()))
    }

    /// Cheap connectivity probe for health checks
    pub async fn ping(pool: &PgPool) -> Result<()> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
