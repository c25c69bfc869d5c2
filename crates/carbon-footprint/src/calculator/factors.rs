//! Canonical emission coefficients.
//!
//! Values are kilograms of CO2e per unit of the quantity named by each field. Adjustment
//! entries (bulk purchase, short circuit, origin, smartphone condition, domestic flights)
//! are dimensionless multipliers. The table is a `static` and is never mutated.

use serde::Serialize;

use super::category::Category;

pub const FACTOR_TABLE_VERSION: &str = "2024.1";

static CANONICAL: FactorTable = FactorTable {
    version: FACTOR_TABLE_VERSION,
    transports: TransportFactors {
        train: 0.014,
        flight: 0.285,
        domestic_flight_multiplier: 0.85,
        car: CarFactors {
            small: 0.1,
            medium: 0.2,
            big: 0.3,
        },
    },
    housing: HousingFactors {
        electricity: 0.57,
        gas: 0.2,
        apartment: 15.0,
        house: 20.0,
        appliance: 0.5,
        electronic: 0.3,
    },
    food: FoodFactors {
        red_meat: 27.0,
        white_meat: 6.9,
        pork: 7.2,
        bulk_purchase: BulkPurchaseFactors {
            none: 1.0,
            partial: 0.9,
            total: 0.8,
        },
        short_circuit: ShortCircuitFactors {
            none: 1.0,
            partial: 0.9,
            majority: 0.8,
        },
    },
    clothing: ClothingFactors {
        large: 15.0,
        small: 10.0,
        origin: OriginFactors {
            france: 1.0,
            other: 1.2,
        },
    },
    digital: DigitalFactors {
        search: 0.0002,
        chat_prompt: 0.000382,
        social_media_hour: 0.00038,
        usage_days: 30.0,
        social_media_days: 365.0,
        smartphone: SmartphoneFactors {
            small: 35.0,
            large: 75.0,
            used: 0.5,
            old: 0.5,
        },
    },
    consumption: ConsumptionFactors {
        amazon: 0.25,
        leboncoin: 0.05,
        artisan: 0.1,
        flea_market: 0.03,
        local_shops: 0.08,
    },
};

/// Versioned set of per-category coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTable {
    pub version: &'static str,
    #[serde(rename = "Transports")]
    pub transports: TransportFactors,
    #[serde(rename = "Housing&Appliances")]
    pub housing: HousingFactors,
    #[serde(rename = "Food")]
    pub food: FoodFactors,
    #[serde(rename = "Clothing")]
    pub clothing: ClothingFactors,
    #[serde(rename = "Digital")]
    pub digital: DigitalFactors,
    #[serde(rename = "Consumption")]
    pub consumption: ConsumptionFactors,
}

impl FactorTable {
    /// Process-wide canonical table.
    pub fn current() -> &'static FactorTable {
        &CANONICAL
    }

    /// Coefficients for a category name; `None` for names outside the known categories.
    pub fn coefficients(&self, category: &str) -> Option<CategoryCoefficients<'_>> {
        Category::parse(category).map(|category| self.for_category(category))
    }

    pub fn for_category(&self, category: Category) -> CategoryCoefficients<'_> {
        match category {
            Category::Transports => CategoryCoefficients::Transports(&self.transports),
            Category::HousingAppliances => CategoryCoefficients::Housing(&self.housing),
            Category::Food => CategoryCoefficients::Food(&self.food),
            Category::Clothing => CategoryCoefficients::Clothing(&self.clothing),
            Category::Digital => CategoryCoefficients::Digital(&self.digital),
            Category::Consumption => CategoryCoefficients::Consumption(&self.consumption),
        }
    }
}

/// Borrowed view of one category's coefficient schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryCoefficients<'a> {
    Transports(&'a TransportFactors),
    Housing(&'a HousingFactors),
    Food(&'a FoodFactors),
    Clothing(&'a ClothingFactors),
    Digital(&'a DigitalFactors),
    Consumption(&'a ConsumptionFactors),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportFactors {
    pub train: f64,
    pub flight: f64,
    pub domestic_flight_multiplier: f64,
    pub car: CarFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarFactors {
    pub small: f64,
    pub medium: f64,
    pub big: f64,
}

impl CarFactors {
    pub fn by_size(&self, size: &str) -> Option<f64> {
        match size {
            "small" => Some(self.small),
            "medium" => Some(self.medium),
            "big" => Some(self.big),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HousingFactors {
    pub electricity: f64,
    pub gas: f64,
    pub apartment: f64,
    pub house: f64,
    pub appliance: f64,
    pub electronic: f64,
}

impl HousingFactors {
    /// Per-square-metre factor for a dwelling type.
    pub fn dwelling(&self, housing_type: &str) -> Option<f64> {
        match housing_type {
            "apartment" => Some(self.apartment),
            "house" => Some(self.house),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodFactors {
    pub red_meat: f64,
    pub white_meat: f64,
    pub pork: f64,
    pub bulk_purchase: BulkPurchaseFactors,
    pub short_circuit: ShortCircuitFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkPurchaseFactors {
    pub none: f64,
    pub partial: f64,
    pub total: f64,
}

impl BulkPurchaseFactors {
    pub fn get(&self, level: &str) -> Option<f64> {
        match level {
            "none" => Some(self.none),
            "partial" => Some(self.partial),
            "total" => Some(self.total),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortCircuitFactors {
    pub none: f64,
    pub partial: f64,
    pub majority: f64,
}

impl ShortCircuitFactors {
    pub fn get(&self, level: &str) -> Option<f64> {
        match level {
            "none" => Some(self.none),
            "partial" => Some(self.partial),
            "majority" => Some(self.majority),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClothingFactors {
    pub large: f64,
    pub small: f64,
    pub origin: OriginFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginFactors {
    pub france: f64,
    pub other: f64,
}

impl OriginFactors {
    pub fn get(&self, origin: &str) -> Option<f64> {
        match origin {
            "france" => Some(self.france),
            // "autre" is the legacy spelling still sent by older clients.
            "other" | "autre" => Some(self.other),
            _ => None,
        }
    }
}

/// Digital usage factors.
///
/// Searches and chat prompts are entered per day and scaled by `usage_days`; social media is
/// entered in hours per day and scaled by `social_media_days`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalFactors {
    pub search: f64,
    pub chat_prompt: f64,
    pub social_media_hour: f64,
    pub usage_days: f64,
    pub social_media_days: f64,
    pub smartphone: SmartphoneFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartphoneFactors {
    pub small: f64,
    pub large: f64,
    pub used: f64,
    pub old: f64,
}

impl SmartphoneFactors {
    pub fn base(&self, size: &str) -> Option<f64> {
        match size {
            "small" => Some(self.small),
            "large" => Some(self.large),
            _ => None,
        }
    }

    /// Condition multiplier; new devices (or unknown states) are not discounted.
    pub fn condition(&self, state: &str) -> Option<f64> {
        match state {
            "used" => Some(self.used),
            "old" => Some(self.old),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionFactors {
    pub amazon: f64,
    pub leboncoin: f64,
    pub artisan: f64,
    pub flea_market: f64,
    pub local_shops: f64,
}
