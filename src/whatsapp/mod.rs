//! Location updates sent by vendors over WhatsApp.

mod dto;
pub mod services;

pub use dto::{InboundMessage, LocationUpdateOutcome};
pub use services::{handle_location_update, location_from_message, sender_number};
