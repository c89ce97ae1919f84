use tracing::{error, info, instrument, warn};

use super::dto::{InboundMessage, LocationUpdateOutcome};
use crate::geo::{parse_map_link, Coordinates};
use crate::state::AppState;
use crate::vendors::{services::normalize_contact_number, ProfileError};

/// Sender's phone number without the `whatsapp:` channel prefix.
pub fn sender_number(msg: &InboundMessage) -> String {
    let from = msg.from.trim();
    let number = from.strip_prefix("whatsapp:").unwrap_or(from);
    normalize_contact_number(number)
}

/// A shared location pin wins; otherwise a map link or `lat,lng` in the text.
pub fn location_from_message(msg: &InboundMessage) -> Option<Coordinates> {
    let pinned = match (msg.latitude.as_deref(), msg.longitude.as_deref()) {
        (Some(lat), Some(lng)) => match (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Coordinates::new(lat, lng),
            _ => None,
        },
        _ => None,
    };
    pinned.or_else(|| msg.body.as_deref().and_then(parse_map_link))
}

#[instrument(skip(state, msg))]
pub async fn handle_location_update(
    state: &AppState,
    msg: InboundMessage,
) -> Result<LocationUpdateOutcome, ProfileError> {
    let number = sender_number(&msg);

    let Some(vendor) = state
        .store
        .find_by_contact_number(&number)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_contact_number failed");
            ProfileError::Internal(e)
        })?
    else {
        warn!(%number, "location update from unregistered number");
        return Ok(LocationUpdateOutcome::UnknownSender);
    };

    let Some(location) = location_from_message(&msg) else {
        warn!(vendor_id = %vendor.id, "location update without coordinates");
        return Ok(LocationUpdateOutcome::NoLocation);
    };

    let updated = state
        .store
        .set_location(vendor.id, location)
        .await
        .map_err(|e| {
            error!(error = %e, vendor_id = %vendor.id, "set_location failed");
            ProfileError::Internal(e)
        })?;
    if !updated {
        // Deleted between lookup and update.
        return Err(ProfileError::NotFound);
    }

    info!(
        vendor_id = %vendor.id,
        lat = location.latitude,
        lng = location.longitude,
        "vendor location updated"
    );
    Ok(LocationUpdateOutcome::Updated {
        vendor_id: vendor.id,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendors::{services::update_profile, MemoryProfileStore, UpdateProfileRequest, Vendor};
    use std::sync::Arc;

    fn message(from: &str, body: Option<&str>, lat: Option<&str>, lng: Option<&str>) -> InboundMessage {
        InboundMessage {
            from: from.into(),
            body: body.map(Into::into),
            latitude: lat.map(Into::into),
            longitude: lng.map(Into::into),
        }
    }

    async fn state_with(vendor: Vendor) -> AppState {
        let store = MemoryProfileStore::new();
        store.insert(vendor).await;
        let mut state = AppState::fake();
        state.store = Arc::new(store);
        state
    }

    #[test]
    fn reads_form_payload() {
        let msg: InboundMessage = serde_json::from_value(serde_json::json!({
            "From": "whatsapp:+919876543210",
            "Latitude": "19.0760",
            "Longitude": "72.8777"
        }))
        .unwrap();
        assert_eq!(sender_number(&msg), "+919876543210");
        assert_eq!(location_from_message(&msg), Coordinates::new(19.0760, 72.8777));
    }

    #[test]
    fn falls_back_to_link_in_body() {
        let msg = message(
            "whatsapp:+919876543210",
            Some("new spot https://maps.google.com/?q=18.5204,73.8567"),
            None,
            None,
        );
        assert_eq!(location_from_message(&msg), Coordinates::new(18.5204, 73.8567));

        let bad_pin = message("whatsapp:+919876543210", Some("12.9,77.6"), Some("abc"), Some("77.6"));
        assert_eq!(location_from_message(&bad_pin), Coordinates::new(12.9, 77.6));

        let nothing = message("whatsapp:+919876543210", Some("hello"), None, None);
        assert_eq!(location_from_message(&nothing), None);
    }

    #[tokio::test]
    async fn updates_registered_vendor() {
        let vendor = Vendor::new("Pani Puri", "+919876543210", "pp@example.com");
        let id = vendor.id;
        let state = state_with(vendor).await;

        let outcome = handle_location_update(
            &state,
            message("whatsapp:+919876543210", None, Some("19.1"), Some("72.9")),
        )
        .await
        .unwrap();

        let here = Coordinates::new(19.1, 72.9).unwrap();
        assert_eq!(
            outcome,
            LocationUpdateOutcome::Updated {
                vendor_id: id,
                location: here
            }
        );
        assert!(outcome.reply().contains("19.10000"));
        assert_eq!(state.store.find_by_id(id).await.unwrap().unwrap().location, Some(here));
    }

    #[tokio::test]
    async fn number_saved_through_profile_matches_whatsapp_sender() {
        let vendor = Vendor::new("Chai Tapri", "+919811111111", "chai@example.com");
        let id = vendor.id;
        let state = state_with(vendor).await;

        let local_only: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "contactNumber": "98765 43210" })).unwrap();
        assert!(matches!(
            update_profile(&state, id, local_only).await,
            Err(ProfileError::InvalidContactNumber)
        ));

        let req: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "contactNumber": "+91 98765 43210" })).unwrap();
        update_profile(&state, id, req).await.unwrap();

        let outcome = handle_location_update(
            &state,
            message("whatsapp:+919876543210", None, Some("19.1"), Some("72.9")),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, LocationUpdateOutcome::Updated { vendor_id, .. } if vendor_id == id));
    }

    #[tokio::test]
    async fn ignores_unknown_senders_and_empty_messages() {
        let vendor = Vendor::new("Momos", "+919876543210", "momos@example.com");
        let id = vendor.id;
        let state = state_with(vendor).await;

        let outcome = handle_location_update(
            &state,
            message("whatsapp:+910000000000", None, Some("19.1"), Some("72.9")),
        )
        .await
        .unwrap();
        assert_eq!(outcome, LocationUpdateOutcome::UnknownSender);

        let outcome = handle_location_update(
            &state,
            message("whatsapp:+919876543210", Some("hi"), None, None),
        )
        .await
        .unwrap();
        assert_eq!(outcome, LocationUpdateOutcome::NoLocation);
        assert!(!outcome.reply().is_empty());
        assert_eq!(state.store.find_by_id(id).await.unwrap().unwrap().location, None);
    }
}
