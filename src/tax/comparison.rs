use super::input::{SimulationError, SimulationInput};
use super::regime::{compute_forfetario, compute_ordinario, Regime, RegimeResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// Both regimes side by side, with the one leaving the higher net income recommended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub forfetario: RegimeResult,
    pub ordinario: RegimeResult,
    pub recommended: Regime,
    /// Absolute difference in net income between the two regimes
    pub difference: Decimal,
}

/// Recommend the regime with the strictly higher net income. On a tie the standard regime
/// is recommended.
pub fn compare(forfetario: RegimeResult, ordinario: RegimeResult) -> Comparison {
    let recommended = if forfetario.net_income > ordinario.net_income {
        Regime::Forfetario
    } else {
        Regime::Ordinario
    };
    let difference = (forfetario.net_income - ordinario.net_income).abs();

    Comparison {
        forfetario,
        ordinario,
        recommended,
        difference,
    }
}

/// Validate the input, run both regimes and compare them
pub fn simulate(input: &SimulationInput) -> Result<Comparison, SimulationError> {
    input.validate()?;

    let forfetario = compute_forfetario(
        input.gross_revenue,
        input.activity_coefficient,
        input.substitute_rate,
        input.contribution_scheme,
    );
    let ordinario = compute_ordinario(
        input.gross_revenue,
        input.deductible_costs,
        input.contribution_scheme,
    );
    let comparison = compare(forfetario, ordinario);

    log::info!(
        "Recommended {} (net income difference {:.2})",
        comparison.recommended,
        comparison.difference
    );

    Ok(comparison)
}

impl Comparison {
    pub fn recommended_result(&self) -> &RegimeResult {
        match self.recommended {
            Regime::Forfetario => &self.forfetario,
            Regime::Ordinario => &self.ordinario,
        }
    }
}
