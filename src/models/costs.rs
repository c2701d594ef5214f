//! Variable trip cost model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the five editable variable cost fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    /// Fuel uplift.
    Fuel,
    /// Catering.
    Catering,
    /// Crew travel expenses.
    Crew,
    /// Landing, parking and handling fees.
    Fees,
    /// On-board supplies.
    Supplies,
}

impl fmt::Display for CostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostField::Fuel => "fuel",
            CostField::Catering => "catering",
            CostField::Crew => "crew",
            CostField::Fees => "fees",
            CostField::Supplies => "supplies",
        })
    }
}

/// The variable operating costs of one flight leg.
///
/// There is no stored total: [`VariableCostBundle::total`] is always the sum
/// of the five fields.
///
/// # Example
///
/// ```
/// use sifl_engine::models::VariableCostBundle;
/// use rust_decimal::Decimal;
///
/// let costs = VariableCostBundle::new(
///     Decimal::from(12500),
///     Decimal::from(450),
///     Decimal::from(1200),
///     Decimal::from(800),
///     Decimal::from(100),
/// );
/// assert_eq!(costs.total(), Decimal::from(15050));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableCostBundle {
    /// Fuel uplift.
    #[serde(default)]
    pub fuel: Decimal,
    /// Catering.
    #[serde(default)]
    pub catering: Decimal,
    /// Crew travel expenses.
    #[serde(default)]
    pub crew: Decimal,
    /// Landing, parking and handling fees.
    #[serde(default)]
    pub fees: Decimal,
    /// On-board supplies.
    #[serde(default)]
    pub supplies: Decimal,
}

impl VariableCostBundle {
    /// Builds a bundle from its five fields.
    pub fn new(
        fuel: Decimal,
        catering: Decimal,
        crew: Decimal,
        fees: Decimal,
        supplies: Decimal,
    ) -> Self {
        Self {
            fuel,
            catering,
            crew,
            fees,
            supplies,
        }
    }

    /// Sum of the five cost fields, saturating at the bounds of [`Decimal`].
    pub fn total(&self) -> Decimal {
        [self.fuel, self.catering, self.crew, self.fees, self.supplies]
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns the value of one field.
    pub fn get(&self, field: CostField) -> Decimal {
        match field {
            CostField::Fuel => self.fuel,
            CostField::Catering => self.catering,
            CostField::Crew => self.crew,
            CostField::Fees => self.fees,
            CostField::Supplies => self.supplies,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with_field(mut self, field: CostField, value: Decimal) -> Self {
        let slot = match field {
            CostField::Fuel => &mut self.fuel,
            CostField::Catering => &mut self.catering,
            CostField::Crew => &mut self.crew,
            CostField::Fees => &mut self.fees,
            CostField::Supplies => &mut self.supplies,
        };
        *slot = value;
        self
    }
}
