//! Per-category accumulation rules. Fields are read in a fixed order; a field that is
//! missing, mistyped, or names an unknown option contributes nothing.

use super::engine::Accumulator;
use super::factors::{
    ClothingFactors, ConsumptionFactors, DigitalFactors, FoodFactors, HousingFactors,
    TransportFactors,
};
use super::inputs::InputBag;

pub(crate) fn transports(factors: &TransportFactors, fields: &InputBag, acc: &mut Accumulator) {
    if let Some(km) = fields.float("trainKm") {
        acc.add("trainKm", km * factors.train);
    }

    if let Some(km) = fields.float("flightKm") {
        let mut factor = factors.flight;
        if fields.text("flightType") == Some("domestic") {
            factor *= factors.domestic_flight_multiplier;
        }
        acc.add("flightKm", km * factor);
    }

    let car = (
        fields.float("carKm"),
        fields.text("carType").and_then(|size| factors.car.by_size(size)),
        fields.positive("carOccupants"),
    );
    if let (Some(km), Some(factor), Some(occupants)) = car {
        acc.add("carKm", km * factor / occupants);
    }
}

pub(crate) fn housing(factors: &HousingFactors, fields: &InputBag, acc: &mut Accumulator) {
    // Every housing term is shared between occupants.
    let Some(occupants) = fields.positive("homeOccupants") else {
        return;
    };

    if let Some(kwh) = fields.float("electricityKwh") {
        acc.add("electricityKwh", kwh * factors.electricity / occupants);
    }
    if let Some(kwh) = fields.float("gasKwh") {
        acc.add("gasKwh", kwh * factors.gas / occupants);
    }

    let dwelling = fields
        .text("housingType")
        .and_then(|kind| factors.dwelling(kind));
    if let (Some(factor), Some(size)) = (dwelling, fields.float("homeSize")) {
        acc.add("homeSize", factor * size / occupants);
    }

    if let Some(count) = fields.float("applianceCount") {
        acc.add("applianceCount", count * factors.appliance / occupants);
    }
    if let Some(count) = fields.float("electronicCount") {
        acc.add("electronicCount", count * factors.electronic / occupants);
    }
}

pub(crate) fn food(factors: &FoodFactors, fields: &InputBag, acc: &mut Accumulator) {
    if let Some(kg) = fields.float("redMeatKg") {
        acc.add("redMeatKg", kg * factors.red_meat);
    }
    if let Some(kg) = fields.float("whiteMeatKg") {
        acc.add("whiteMeatKg", kg * factors.white_meat);
    }
    if let Some(kg) = fields.float("porkKg") {
        acc.add("porkKg", kg * factors.pork);
    }

    // Adjustments scale the full subtotal, bulk purchase first.
    if let Some(factor) = fields
        .text("bulkPurchase")
        .and_then(|level| factors.bulk_purchase.get(level))
    {
        acc.scale("bulkPurchase", factor);
    }
    if let Some(factor) = fields
        .text("shortCircuit")
        .and_then(|level| factors.short_circuit.get(level))
    {
        acc.scale("shortCircuit", factor);
    }
}

pub(crate) fn clothing(factors: &ClothingFactors, fields: &InputBag, acc: &mut Accumulator) {
    if let Some(items) = fields.float("largeItems") {
        acc.add("largeItems", items * factors.large);
    }
    if let Some(items) = fields.float("smallItems") {
        acc.add("smallItems", items * factors.small);
    }
    if let Some(factor) = fields
        .text("origin")
        .and_then(|origin| factors.origin.get(origin))
    {
        acc.scale("origin", factor);
    }
}

pub(crate) fn digital(factors: &DigitalFactors, fields: &InputBag, acc: &mut Accumulator) {
    if let Some(per_day) = fields.float("googleSearches") {
        acc.add(
            "googleSearches",
            per_day * factors.usage_days * factors.search,
        );
    }
    if let Some(per_day) = fields.float("chatgptPrompts") {
        acc.add(
            "chatgptPrompts",
            per_day * factors.usage_days * factors.chat_prompt,
        );
    }

    // One device acquisition per submission, not per unit.
    if let Some(base) = fields
        .text("smartphoneType")
        .and_then(|size| factors.smartphone.base(size))
    {
        let condition = fields
            .text("smartphoneState")
            .and_then(|state| factors.smartphone.condition(state))
            .unwrap_or(1.0);
        acc.add("smartphoneType", base * condition);
    }

    if let Some(hours) = fields.float("socialHours") {
        acc.add(
            "socialHours",
            hours * factors.social_media_days * factors.social_media_hour,
        );
    }
}

pub(crate) fn consumption(factors: &ConsumptionFactors, fields: &InputBag, acc: &mut Accumulator) {
    let terms = [
        ("amazonOrders", factors.amazon),
        ("leboncoinOrders", factors.leboncoin),
        ("artisanatOrders", factors.artisan),
        ("brocanteItems", factors.flea_market),
        ("localShopOrders", factors.local_shops),
    ];

    for (field, factor) in terms {
        if let Some(count) = fields.float(field) {
            acc.add(field, count * factor);
        }
    }
}
