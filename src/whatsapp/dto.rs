use serde::Deserialize;
use uuid::Uuid;

use crate::geo::Coordinates;

/// Inbound WhatsApp webhook message (form fields, PascalCase).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InboundMessage {
    pub from: String, // "whatsapp:+919876543210"
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdateOutcome {
    Updated { vendor_id: Uuid, location: Coordinates },
    UnknownSender,
    NoLocation,
}

impl LocationUpdateOutcome {
    /// Text sent back to the vendor on WhatsApp.
    pub fn reply(&self) -> String {
        match self {
            LocationUpdateOutcome::Updated { location, .. } => format!(
                "Location updated to {:.5}, {:.5}. Customers can now find you on the map.",
                location.latitude, location.longitude
            ),
            LocationUpdateOutcome::UnknownSender => {
                "This number is not registered as a vendor. Add it to your profile first.".into()
            }
            LocationUpdateOutcome::NoLocation => {
                "Please share your current location or send a map link to update your stall."
                    .into()
            }
        }
    }
}
