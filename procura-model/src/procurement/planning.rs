use serde::{Deserialize, Serialize};

use crate::{EntitySchema, FieldSpec, Record, SchemaRecord};

/// A vendor-managed-inventory agreement: the supplier keeps `sku` between
/// `min_level` and `max_level` at the customer site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmiAgreement {
    pub supplier: String,
    pub sku: String,
    pub min_level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub review_cycle_days: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl VmiAgreement {
    /// Units the supplier should ship given current stock.
    pub fn replenishment_quantity(&self, on_hand: u32) -> u32 {
        if !self.active || on_hand >= self.min_level {
            return 0;
        }
        self.max_level.saturating_sub(on_hand)
    }
}

impl Record for VmiAgreement {}

impl SchemaRecord for VmiAgreement {
    const ENTITY_TYPE: &'static str = "vmiAgreement";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("supplier").required())
            .field(FieldSpec::text("sku").required())
            .field(FieldSpec::number("minLevel"))
            .field(FieldSpec::number("maxLevel").required())
            .field(FieldSpec::number("reviewCycleDays"))
            .field(FieldSpec::bool("active"))
    }
}

/// Forecast demand against planned supply for one SKU and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandForecast {
    pub sku: String,
    /// Planning bucket, e.g. `2026-11`.
    pub period: String,
    #[serde(default)]
    pub forecast_quantity: u32,
    #[serde(default)]
    pub planned_supply: u32,
}

impl DemandForecast {
    /// Planned supply minus forecast demand; negative is a shortfall.
    pub fn coverage_gap(&self) -> i64 {
        i64::from(self.planned_supply) - i64::from(self.forecast_quantity)
    }

    pub fn is_short(&self) -> bool {
        self.coverage_gap() < 0
    }
}

impl Record for DemandForecast {}

impl SchemaRecord for DemandForecast {
    const ENTITY_TYPE: &'static str = "demandForecast";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("sku").required())
            .field(FieldSpec::text("period").required())
            .field(FieldSpec::number("forecastQuantity"))
            .field(FieldSpec::number("plannedSupply"))
    }
}
