// src/core/rating.rs
use serde::Serialize;

/// Coarse audience band for a certificate string (`PG-13`, `12A`, `U/A`, ...).
/// Regional certificates fold into the closest US band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBand {
    G,
    PG,
    PG13,
    R,
    NC17,
    #[serde(rename = "All Ages")]
    AllAges,
}

impl AgeBand {
    pub fn classify(raw: Option<&str>) -> Self {
        let cleaned = raw.map(|r| r.trim().to_ascii_uppercase()).unwrap_or_default();
        match cleaned.as_str() {
            "G" | "U" => AgeBand::G,
            "PG" | "U/A" => AgeBand::PG,
            "PG-13" | "12" | "12A" => AgeBand::PG13,
            "R" | "15" | "18" | "A" => AgeBand::R,
            "NC-17" => AgeBand::NC17,
            _ => AgeBand::AllAges,
        }
    }
}
