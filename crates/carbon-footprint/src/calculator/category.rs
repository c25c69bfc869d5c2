use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level lifestyle domain with its own coefficient schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Transports,
    #[serde(rename = "Housing&Appliances", alias = "Logement_electromenagers")]
    HousingAppliances,
    #[serde(alias = "Alimentation")]
    Food,
    #[serde(alias = "Vetements")]
    Clothing,
    #[serde(alias = "Numerique")]
    Digital,
    #[serde(alias = "Consommation")]
    Consumption,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Transports,
        Category::HousingAppliances,
        Category::Food,
        Category::Clothing,
        Category::Digital,
        Category::Consumption,
    ];

    /// Resolves a canonical name or one of the legacy French wire names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Transports" => Some(Self::Transports),
            "Housing&Appliances" | "Logement_electromenagers" => Some(Self::HousingAppliances),
            "Food" | "Alimentation" => Some(Self::Food),
            "Clothing" | "Vetements" => Some(Self::Clothing),
            "Digital" | "Numerique" => Some(Self::Digital),
            "Consumption" | "Consommation" => Some(Self::Consumption),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Transports => "Transports",
            Self::HousingAppliances => "Housing&Appliances",
            Self::Food => "Food",
            Self::Clothing => "Clothing",
            Self::Digital => "Digital",
            Self::Consumption => "Consumption",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownCategory(value.to_string()))
    }
}
