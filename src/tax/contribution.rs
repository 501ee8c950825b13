use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// INPS Gestione Separata rate
pub const SEPARATE_MANAGEMENT_RATE: Decimal = dec!(0.2607);
/// INPS artigiani/commercianti rate
pub const ARTISANS_TRADERS_RATE: Decimal = dec!(0.24);
/// Minimum yearly contribution for artisans and traders, due even on little or no income
pub const ARTISANS_TRADERS_MINIMUM: Decimal = dec!(4200);

/// INPS social contribution scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionScheme {
    /// Gestione Separata (freelancers without a professional fund)
    #[default]
    SeparateManagement,
    /// Gestione artigiani e commercianti
    ArtisansTraders,
}

impl ContributionScheme {
    pub fn name(self) -> &'static str {
        match self {
            ContributionScheme::SeparateManagement => "separate-management",
            ContributionScheme::ArtisansTraders => "artisans-traders",
        }
    }
}

impl std::fmt::Display for ContributionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Social contribution due on `taxable_amount` under the given scheme
pub fn contribution(taxable_amount: Decimal, scheme: ContributionScheme) -> Decimal {
    match scheme {
        ContributionScheme::SeparateManagement => taxable_amount * SEPARATE_MANAGEMENT_RATE,
        ContributionScheme::ArtisansTraders => {
            (taxable_amount * ARTISANS_TRADERS_RATE).max(ARTISANS_TRADERS_MINIMUM)
        }
    }
}
