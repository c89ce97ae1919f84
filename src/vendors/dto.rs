use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;
use crate::hours::OperatingHours;

/// Profile edit submitted by a vendor. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub map_link: Option<String>,
    pub operating_hours: Option<OperatingHours>,
    pub display_pic: Option<String>,
}

/// Validated and normalized edit, ready for the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub map_link: Option<String>,
    pub location: Option<Coordinates>, // parsed from map_link
    pub operating_hours: Option<OperatingHours>,
    pub display_pic: Option<String>,
}

/// Listing entry for the map and vendor list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub id: Uuid,
    pub name: String,
    pub location: Option<Coordinates>,
    pub operating_hours: Option<OperatingHours>,
    pub open_now: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

pub const MAX_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn with_limit(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }

    /// `(limit, offset)` clamped to `1..=MAX_LIMIT` and `>= 0`.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}
