//! Street-vendor profiles for the Laari Khojo map: operating hours and
//! "open now" evaluation, profile validation, map-link coordinates and
//! WhatsApp location updates.

pub mod config;
pub mod geo;
pub mod hours;
pub mod state;
pub mod telemetry;
pub mod vendors;
pub mod whatsapp;
