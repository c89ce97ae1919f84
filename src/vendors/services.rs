use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{Pagination, ProfileUpdate, UpdateProfileRequest, VendorSummary};
use super::error::ProfileError;
use super::repo::ContactNumberTaken;
use super::repo_types::Vendor;
use crate::geo::parse_map_link;
use crate::hours::{is_open_at, normalize_strict, LocalInstant};
use crate::state::AppState;

/// Strips the separators people type into phone numbers, keeping digits and
/// a leading `+`. An international `00` prefix becomes `+`.
pub fn normalize_contact_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else if let Some(rest) = digits.strip_prefix("00") {
        format!("+{rest}")
    } else {
        digits
    }
}

/// Numbers are stored in international form (`+` and country code) so they
/// match the sender of WhatsApp messages exactly.
pub(crate) fn is_valid_contact_number(number: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+[1-9][0-9]{9,14}$").unwrap();
    }
    PHONE_RE.is_match(number)
}

/// Checks a profile edit and converts it to its stored form.
///
/// Operating hours must already be in strict 24-hour `HH:MM`; the lenient
/// 12-hour grammar is only for reading old records back.
pub fn validate_update(req: UpdateProfileRequest) -> Result<ProfileUpdate, ProfileError> {
    let name = match req.name {
        Some(name) if name.trim().is_empty() => return Err(ProfileError::InvalidName),
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };

    let contact_number = match req.contact_number {
        Some(raw) => {
            let number = normalize_contact_number(&raw);
            if !is_valid_contact_number(&number) {
                return Err(ProfileError::InvalidContactNumber);
            }
            Some(number)
        }
        None => None,
    };

    let (map_link, location) = match req.map_link {
        Some(link) => {
            let link = link.trim().to_string();
            let coords = parse_map_link(&link).ok_or(ProfileError::InvalidMapLink)?;
            (Some(link), Some(coords))
        }
        None => (None, None),
    };

    let operating_hours = req
        .operating_hours
        .as_ref()
        .map(normalize_strict)
        .transpose()?;

    let display_pic = req
        .display_pic
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    Ok(ProfileUpdate {
        name,
        contact_number,
        map_link,
        location,
        operating_hours,
        display_pic,
    })
}

#[instrument(skip(state, req))]
pub async fn update_profile(
    state: &AppState,
    vendor_id: Uuid,
    req: UpdateProfileRequest,
) -> Result<Vendor, ProfileError> {
    let update = validate_update(req).map_err(|e| {
        warn!(error = %e, "profile update rejected");
        e
    })?;

    let vendor = state
        .store
        .apply_update(vendor_id, &update)
        .await
        .map_err(|e| {
            if e.is::<ContactNumberTaken>() {
                warn!("profile update rejected: contact number taken");
                ProfileError::ContactNumberTaken
            } else {
                error!(error = %e, "apply_update failed");
                ProfileError::Internal(e)
            }
        })?
        .ok_or_else(|| {
            warn!("profile update for unknown vendor");
            ProfileError::NotFound
        })?;

    info!(
        hours_set = update.operating_hours.is_some(),
        location_set = update.location.is_some(),
        "vendor profile updated"
    );
    Ok(vendor)
}

pub fn summarize(vendor: Vendor, at: LocalInstant) -> VendorSummary {
    let open_now = vendor
        .operating_hours
        .as_ref()
        .is_some_and(|h| is_open_at(h, at));
    VendorSummary {
        id: vendor.id,
        name: vendor.name,
        location: vendor.location,
        operating_hours: vendor.operating_hours,
        open_now,
    }
}

/// Vendor list with each entry's open/closed state at `at`.
#[instrument(skip(state))]
pub async fn list_vendors(
    state: &AppState,
    pagination: Pagination,
    at: LocalInstant,
) -> Result<Vec<VendorSummary>, ProfileError> {
    let (limit, offset) = pagination.clamped();
    let vendors = state.store.list(limit, offset).await.map_err(|e| {
        error!(error = %e, "list vendors failed");
        ProfileError::Internal(e)
    })?;

    let summaries: Vec<_> = vendors.into_iter().map(|v| summarize(v, at)).collect();
    info!(
        count = summaries.len(),
        open = summaries.iter().filter(|s| s.open_now).count(),
        "vendors listed"
    );
    Ok(summaries)
}

/// [`list_vendors`] at the current time in the configured vendor timezone.
/// Uses the configured page size when `pagination` is `None`.
pub async fn list_vendors_now(
    state: &AppState,
    pagination: Option<Pagination>,
) -> Result<Vec<VendorSummary>, ProfileError> {
    let pagination =
        pagination.unwrap_or_else(|| Pagination::with_limit(state.config.listing_default_limit));
    list_vendors(state, pagination, LocalInstant::now(state.config.local_offset)).await
}
