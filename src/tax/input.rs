use super::contribution::ContributionScheme;
use super::italy::{ActivityCategory, SubstituteRate};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl SimulationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Everything the simulator needs to compare the two regimes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimulationInput {
    /// Gross annual revenue in euro (fatturato)
    #[schemars(with = "f64")]
    pub gross_revenue: Decimal,
    /// Profitability coefficient of the ATECO category, between 0 and 1
    #[schemars(with = "f64")]
    pub activity_coefficient: Decimal,
    /// Flat-rate substitute tax percentage: 5 or 15
    #[serde(default)]
    #[schemars(with = "u8")]
    pub substitute_rate: SubstituteRate,
    /// INPS scheme: separate-management or artisans-traders
    #[serde(default)]
    pub contribution_scheme: ContributionScheme,
    /// Deductible costs in euro, only used by the standard regime
    #[serde(default)]
    #[schemars(with = "f64")]
    pub deductible_costs: Decimal,
}

impl SimulationInput {
    pub fn new(gross_revenue: Decimal, category: &ActivityCategory) -> Self {
        SimulationInput {
            gross_revenue,
            activity_coefficient: category.coefficient,
            substitute_rate: SubstituteRate::default(),
            contribution_scheme: ContributionScheme::default(),
            deductible_costs: Decimal::ZERO,
        }
    }

    /// Reject negative amounts and coefficients outside [0, 1]
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_non_negative("gross revenue", self.gross_revenue)?;
        ensure_non_negative("deductible costs", self.deductible_costs)?;
        if self.activity_coefficient < Decimal::ZERO || self.activity_coefficient > Decimal::ONE {
            return Err(SimulationError::invalid(
                "activity coefficient",
                format!("{} is outside 0..=1", self.activity_coefficient),
            ));
        }
        Ok(())
    }
}

/// Read a simulation input document from JSON
pub fn read_input_json<R: Read>(reader: R) -> anyhow::Result<SimulationInput> {
    let input: SimulationInput = serde_json::from_reader(reader)?;
    input.validate()?;
    Ok(input)
}

/// Parse a user-supplied currency amount. Non-numeric and negative values are rejected.
pub fn parse_amount(field: &'static str, value: &str) -> Result<Decimal, SimulationError> {
    let trimmed = value.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| SimulationError::invalid(field, format!("'{value}' is not a number")))?;
    ensure_non_negative(field, amount)?;
    Ok(amount)
}

fn ensure_non_negative(field: &'static str, amount: Decimal) -> Result<(), SimulationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SimulationError::invalid(
            field,
            format!("{amount} is negative"),
        ));
    }
    Ok(())
}
