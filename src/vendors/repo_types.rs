use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::services::normalize_contact_number;
use crate::geo::Coordinates;
use crate::hours::OperatingHours;

/// Vendor profile as the rest of the crate sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub location: Option<Coordinates>,
    pub map_link: Option<String>,
    pub operating_hours: Option<OperatingHours>,
    pub display_pic: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Vendor {
    /// Fresh record with no profile details yet. The contact number is
    /// normalized the same way profile updates normalize it.
    pub fn new(name: &str, contact_number: &str, email: &str) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            contact_number: normalize_contact_number(contact_number),
            email: email.to_string(),
            location: None,
            map_link: None,
            operating_hours: None,
            display_pic: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Row in the `vendors` table.
#[derive(Debug, Clone, FromRow)]
pub struct VendorRow {
    pub id: Uuid,
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_link: Option<String>,
    pub operating_hours: Option<serde_json::Value>, // JSONB, stored as submitted
    pub display_pic: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<VendorRow> for Vendor {
    fn from(r: VendorRow) -> Self {
        let location = match (r.latitude, r.longitude) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
            _ => None,
        };
        // Every field of OperatingHours tolerates junk, so this only fails
        // when the column holds a non-object; evaluation treats that as closed.
        let operating_hours = r
            .operating_hours
            .and_then(|v| serde_json::from_value(v).ok());
        Self {
            id: r.id,
            name: r.name,
            contact_number: r.contact_number,
            email: r.email,
            location,
            map_link: r.map_link,
            operating_hours,
            display_pic: r.display_pic,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
