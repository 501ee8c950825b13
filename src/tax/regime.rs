use super::contribution::{contribution, ContributionScheme};
use super::italy::{
    SubstituteRate, IRPEF_FIRST_RATE, IRPEF_FIRST_THRESHOLD, IRPEF_SECOND_RATE,
    IRPEF_SECOND_THRESHOLD, IRPEF_TOP_RATE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Italian tax regime for a sole trader / freelancer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Flat-rate regime (regime forfetario)
    Forfetario,
    /// Standard progressive regime (regime ordinario)
    Ordinario,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Forfetario => f.write_str("Forfetario"),
            Regime::Ordinario => f.write_str("Ordinario"),
        }
    }
}

/// Outcome of a regime calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub gross_revenue: Decimal,
    /// Income before contributions (revenue * coefficient, or revenue - costs)
    pub taxable_income: Decimal,
    /// Income after contributions, the base the tax is levied on
    pub taxable_base: Decimal,
    pub tax_due: Decimal,
    pub contributions_due: Decimal,
    pub total_burden: Decimal,
    /// May be negative when contributions exceed revenue
    pub net_income: Decimal,
}

impl RegimeResult {
    fn new(
        regime: Regime,
        gross_revenue: Decimal,
        taxable_income: Decimal,
        taxable_base: Decimal,
        tax_due: Decimal,
        contributions_due: Decimal,
    ) -> Self {
        let total_burden = tax_due + contributions_due;
        RegimeResult {
            regime,
            gross_revenue,
            taxable_income,
            taxable_base,
            tax_due,
            contributions_due,
            total_burden,
            net_income: gross_revenue - total_burden,
        }
    }

    /// Net income clamped at zero, for display only
    pub fn display_net_income(&self) -> Decimal {
        self.net_income.max(Decimal::ZERO)
    }

    /// Total burden as a percentage of gross revenue. `None` without revenue, or when the
    /// contribution floor dwarfs a tiny revenue and the ratio does not fit in a `Decimal`.
    pub fn effective_rate(&self) -> Option<Decimal> {
        if self.gross_revenue <= Decimal::ZERO {
            return None;
        }
        self.total_burden
            .checked_div(self.gross_revenue)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
    }
}

/// Flat-rate regime: the coefficient turns revenue into income, taxed at the substitute rate
/// after deducting contributions.
pub fn compute_forfetario(
    gross_revenue: Decimal,
    coefficient: Decimal,
    substitute_rate: SubstituteRate,
    scheme: ContributionScheme,
) -> RegimeResult {
    let taxable_income = gross_revenue * coefficient;
    let contributions_due = contribution(taxable_income, scheme);
    let taxable_base = (taxable_income - contributions_due).max(Decimal::ZERO);
    let tax_due = taxable_base * substitute_rate.rate();

    log::debug!(
        "Forfetario: income {} contributions {} base {} tax {}",
        taxable_income,
        contributions_due,
        taxable_base,
        tax_due
    );

    RegimeResult::new(
        Regime::Forfetario,
        gross_revenue,
        taxable_income,
        taxable_base,
        tax_due,
        contributions_due,
    )
}

/// Standard regime: deductible costs and contributions reduce the base, which is taxed with
/// progressive IRPEF.
pub fn compute_ordinario(
    gross_revenue: Decimal,
    deductible_costs: Decimal,
    scheme: ContributionScheme,
) -> RegimeResult {
    let gross_taxable = (gross_revenue - deductible_costs).max(Decimal::ZERO);
    let contributions_due = contribution(gross_taxable, scheme);
    let taxable_base = (gross_taxable - contributions_due).max(Decimal::ZERO);
    let tax_due = progressive_income_tax(taxable_base);

    log::debug!(
        "Ordinario: income {} contributions {} base {} tax {}",
        gross_taxable,
        contributions_due,
        taxable_base,
        tax_due
    );

    RegimeResult::new(
        Regime::Ordinario,
        gross_revenue,
        gross_taxable,
        taxable_base,
        tax_due,
        contributions_due,
    )
}

/// IRPEF on the taxable base. Brackets are applied top-down by sequential subtraction, so a
/// base of exactly 28,000 is taxed entirely at 23%.
pub fn progressive_income_tax(taxable_base: Decimal) -> Decimal {
    if taxable_base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = taxable_base;
    let mut tax = Decimal::ZERO;

    if remaining > IRPEF_SECOND_THRESHOLD {
        tax += (remaining - IRPEF_SECOND_THRESHOLD) * IRPEF_TOP_RATE;
        remaining = IRPEF_SECOND_THRESHOLD;
    }
    if remaining > IRPEF_FIRST_THRESHOLD {
        tax += (remaining - IRPEF_FIRST_THRESHOLD) * IRPEF_SECOND_RATE;
        remaining = IRPEF_FIRST_THRESHOLD;
    }
    tax + remaining * IRPEF_FIRST_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irpef_bracket_boundaries() {
        assert_eq!(progressive_income_tax(dec!(28000)), dec!(6440));
        assert_eq!(progressive_income_tax(dec!(50000)), dec!(14140));
        assert_eq!(progressive_income_tax(dec!(60000)), dec!(18440));
    }

    #[test]
    fn irpef_just_above_first_threshold() {
        assert_eq!(progressive_income_tax(dec!(28001)), dec!(6440.35));
    }

    #[test]
    fn irpef_zero_and_negative_base() {
        assert_eq!(progressive_income_tax(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(progressive_income_tax(dec!(-100)), Decimal::ZERO);
    }

    #[test]
    fn irpef_is_non_decreasing() {
        let mut previous = Decimal::ZERO;
        let mut base = Decimal::ZERO;
        while base <= dec!(80000) {
            let tax = progressive_income_tax(base);
            assert!(tax >= previous, "tax decreased at {base}");
            previous = tax;
            base += dec!(250);
        }
    }

    #[test]
    fn forfetario_services_separate_management() {
        let result = compute_forfetario(
            dec!(50000),
            dec!(0.78),
            SubstituteRate::Standard,
            ContributionScheme::SeparateManagement,
        );
        assert_eq!(result.regime, Regime::Forfetario);
        assert_eq!(result.taxable_income, dec!(39000));
        assert_eq!(result.contributions_due, dec!(10167.3));
        assert_eq!(result.taxable_base, dec!(28832.7));
        assert_eq!(result.tax_due, dec!(4324.905));
        assert_eq!(result.total_burden, dec!(14492.205));
        assert_eq!(result.net_income, dec!(35507.795));
    }

    #[test]
    fn ordinario_artisans_traders() {
        let result = compute_ordinario(dec!(50000), dec!(15000), ContributionScheme::ArtisansTraders);
        assert_eq!(result.regime, Regime::Ordinario);
        assert_eq!(result.taxable_income, dec!(35000));
        assert_eq!(result.contributions_due, dec!(8400));
        assert_eq!(result.taxable_base, dec!(26600));
        assert_eq!(result.tax_due, dec!(6118));
        assert_eq!(result.total_burden, dec!(14518));
        assert_eq!(result.net_income, dec!(35482));
    }

    #[test]
    fn ordinario_costs_above_revenue() {
        let result = compute_ordinario(dec!(10000), dec!(12000), ContributionScheme::SeparateManagement);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.contributions_due, Decimal::ZERO);
        assert_eq!(result.tax_due, Decimal::ZERO);
        assert_eq!(result.net_income, dec!(10000));
    }

    #[test]
    fn contribution_floor_makes_net_income_negative() {
        let result = compute_forfetario(
            dec!(1000),
            dec!(0.40),
            SubstituteRate::Standard,
            ContributionScheme::ArtisansTraders,
        );
        assert_eq!(result.contributions_due, dec!(4200));
        assert_eq!(result.taxable_base, Decimal::ZERO);
        assert_eq!(result.tax_due, Decimal::ZERO);
        assert_eq!(result.net_income, dec!(-3200));
        assert_eq!(result.display_net_income(), Decimal::ZERO);
    }

    #[test]
    fn accounting_identity_holds_for_both_regimes() {
        let revenues = [dec!(0), dec!(1), dec!(999.99), dec!(28000), dec!(50000), dec!(123456.78)];
        for revenue in revenues {
            for scheme in [ContributionScheme::SeparateManagement, ContributionScheme::ArtisansTraders] {
                let forf = compute_forfetario(revenue, dec!(0.67), SubstituteRate::StartUp, scheme);
                assert_eq!(forf.net_income + forf.total_burden, revenue);
                assert_eq!(forf.total_burden, forf.tax_due + forf.contributions_due);

                let ord = compute_ordinario(revenue, dec!(7500), scheme);
                assert_eq!(ord.net_income + ord.total_burden, revenue);
                assert_eq!(ord.total_burden, ord.tax_due + ord.contributions_due);
            }
        }
    }

    #[test]
    fn higher_substitute_rate_never_increases_net_income() {
        for revenue in [dec!(5000), dec!(30000), dec!(85000)] {
            for scheme in [ContributionScheme::SeparateManagement, ContributionScheme::ArtisansTraders] {
                let reduced = compute_forfetario(revenue, dec!(0.78), SubstituteRate::StartUp, scheme);
                let standard = compute_forfetario(revenue, dec!(0.78), SubstituteRate::Standard, scheme);
                assert!(standard.net_income <= reduced.net_income);
            }
        }
    }

    #[test]
    fn identical_inputs_identical_results() {
        let first = compute_ordinario(dec!(72000), dec!(9000), ContributionScheme::SeparateManagement);
        let second = compute_ordinario(dec!(72000), dec!(9000), ContributionScheme::SeparateManagement);
        assert_eq!(first, second);
    }

    #[test]
    fn effective_rate() {
        let result = compute_ordinario(dec!(50000), dec!(15000), ContributionScheme::ArtisansTraders);
        assert_eq!(result.effective_rate(), Some(dec!(29.036)));

        let empty = compute_ordinario(Decimal::ZERO, Decimal::ZERO, ContributionScheme::SeparateManagement);
        assert_eq!(empty.effective_rate(), None);
    }

    #[test]
    fn effective_rate_out_of_range_for_tiny_revenue() {
        let result = compute_forfetario(
            Decimal::new(1, 28),
            dec!(0.78),
            SubstituteRate::Standard,
            ContributionScheme::ArtisansTraders,
        );
        assert_eq!(result.contributions_due, dec!(4200));
        assert_eq!(result.effective_rate(), None);
    }
}
