use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// WGS84 point as shown on the vendor map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    fn from_strs(latitude: &str, longitude: &str) -> Option<Self> {
        Self::new(latitude.parse().ok()?, longitude.parse().ok()?)
    }
}

lazy_static! {
    // Place marker inside `data=` segments: `!3d<lat>!4d<lng>`.
    static ref PLACE_RE: Regex =
        Regex::new(r"!3d(-?[0-9]+(?:\.[0-9]+)?)!4d(-?[0-9]+(?:\.[0-9]+)?)").unwrap();
    // `?q=12.97,77.59`, `&ll=...`, `destination=...`; comma may be URL-encoded.
    static ref QUERY_RE: Regex = Regex::new(
        r"[?&](?:q|query|ll|destination)=(-?[0-9]+(?:\.[0-9]+)?)(?:,|%2[Cc])(?:\+|%20|\s)*(-?[0-9]+(?:\.[0-9]+)?)"
    )
    .unwrap();
    // Map viewport centre: `/@12.97,77.59,17z`.
    static ref VIEWPORT_RE: Regex =
        Regex::new(r"@(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref PAIR_RE: Regex =
        Regex::new(r"^\s*(-?[0-9]+(?:\.[0-9]+)?)\s*,\s*(-?[0-9]+(?:\.[0-9]+)?)\s*$").unwrap();
}

/// Pulls coordinates out of a pasted map link or a bare `lat,lng` pair.
///
/// The place marker wins over query parameters, which win over the viewport
/// centre. Shortened links (`maps.app.goo.gl/...`) carry no coordinates and
/// yield `None`.
pub fn parse_map_link(link: &str) -> Option<Coordinates> {
    [&*PLACE_RE, &*QUERY_RE, &*VIEWPORT_RE, &*PAIR_RE]
        .into_iter()
        .find_map(|re| {
            re.captures_iter(link)
                .find_map(|caps| Coordinates::from_strs(&caps[1], &caps[2]))
        })
}
