use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dto::ProfileUpdate;
use super::repo_types::{Vendor, VendorRow};
use crate::geo::Coordinates;

/// Returned (inside `anyhow::Error`) when an update would give a vendor a
/// contact number another vendor already has.
#[derive(Debug, Error)]
#[error("contact number already registered")]
pub struct ContactNumberTaken;

/// Persistence for vendor profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vendor>>;
    async fn find_by_contact_number(&self, contact_number: &str) -> anyhow::Result<Option<Vendor>>;
    /// Oldest first.
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Vendor>>;
    /// `None` when no vendor has this id. Fails with [`ContactNumberTaken`]
    /// when the new number belongs to another vendor.
    async fn apply_update(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<Option<Vendor>>;
    /// `false` when no vendor has this id.
    async fn set_location(&self, id: Uuid, location: Coordinates) -> anyhow::Result<bool>;
}

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

const VENDOR_COLUMNS: &str = "id, name, contact_number, email, latitude, longitude, map_link, \
     operating_hours, display_pic, created_at, updated_at";

/// Postgres-backed store over a caller-owned pool.
#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Applies the bundled `vendors` schema.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run vendor migrations")?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vendor>> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find vendor by id")?;
        Ok(row.map(Vendor::from))
    }

    async fn find_by_contact_number(&self, contact_number: &str) -> anyhow::Result<Option<Vendor>> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE contact_number = $1"
        ))
        .bind(contact_number)
        .fetch_optional(&self.db)
        .await
        .context("find vendor by contact number")?;
        Ok(row.map(Vendor::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Vendor>> {
        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            SELECT {VENDOR_COLUMNS}
              FROM vendors
             ORDER BY created_at ASC
             LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list vendors")?;
        Ok(rows.into_iter().map(Vendor::from).collect())
    }

    async fn apply_update(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<Option<Vendor>> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            UPDATE vendors
               SET name            = COALESCE($2, name),
                   contact_number  = COALESCE($3, contact_number),
                   map_link        = COALESCE($4, map_link),
                   latitude        = COALESCE($5, latitude),
                   longitude       = COALESCE($6, longitude),
                   operating_hours = COALESCE($7, operating_hours),
                   display_pic     = COALESCE($8, display_pic),
                   updated_at      = now()
             WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.contact_number.as_deref())
        .bind(update.map_link.as_deref())
        .bind(update.location.map(|c| c.latitude))
        .bind(update.location.map(|c| c.longitude))
        .bind(update.operating_hours.as_ref().map(Json))
        .bind(update.display_pic.as_deref())
        .fetch_optional(&self.db)
        .await;

        match row {
            Ok(row) => Ok(row.map(Vendor::from)),
            // contact_number is the only UNIQUE column an update can touch.
            Err(e) if is_unique_violation(&e) => Err(ContactNumberTaken.into()),
            Err(e) => Err(anyhow::Error::new(e).context("update vendor profile")),
        }
    }

    async fn set_location(&self, id: Uuid, location: Coordinates) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vendors
               SET latitude = $2, longitude = $3, updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(&self.db)
        .await
        .context("set vendor location")?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-process store for tests and local runs without a database.
#[derive(Default)]
pub struct MemoryProfileStore {
    vendors: RwLock<HashMap<Uuid, Vendor>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, vendor: Vendor) {
        self.vendors.write().await.insert(vendor.id, vendor);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Vendor>> {
        Ok(self.vendors.read().await.get(&id).cloned())
    }

    async fn find_by_contact_number(&self, contact_number: &str) -> anyhow::Result<Option<Vendor>> {
        Ok(self
            .vendors
            .read()
            .await
            .values()
            .find(|v| v.contact_number == contact_number)
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Vendor>> {
        let mut all: Vec<Vendor> = self.vendors.read().await.values().cloned().collect();
        all.sort_by_key(|v| (v.created_at, v.id));
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(all.into_iter().skip(offset).take(limit).collect())
    }

    async fn apply_update(&self, id: Uuid, update: &ProfileUpdate) -> anyhow::Result<Option<Vendor>> {
        let mut vendors = self.vendors.write().await;
        if let Some(number) = &update.contact_number {
            let taken = vendors
                .values()
                .any(|v| v.id != id && &v.contact_number == number);
            if taken && vendors.contains_key(&id) {
                return Err(ContactNumberTaken.into());
            }
        }
        let Some(vendor) = vendors.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            vendor.name = name.clone();
        }
        if let Some(contact_number) = &update.contact_number {
            vendor.contact_number = contact_number.clone();
        }
        if let Some(map_link) = &update.map_link {
            vendor.map_link = Some(map_link.clone());
        }
        if let Some(location) = update.location {
            vendor.location = Some(location);
        }
        if let Some(hours) = &update.operating_hours {
            vendor.operating_hours = Some(hours.clone());
        }
        if let Some(display_pic) = &update.display_pic {
            vendor.display_pic = Some(display_pic.clone());
        }
        vendor.updated_at = OffsetDateTime::now_utc();
        Ok(Some(vendor.clone()))
    }

    async fn set_location(&self, id: Uuid, location: Coordinates) -> anyhow::Result<bool> {
        let mut vendors = self.vendors.write().await;
        match vendors.get_mut(&id) {
            Some(vendor) => {
                vendor.location = Some(location);
                vendor.updated_at = OffsetDateTime::now_utc();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
