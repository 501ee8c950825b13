//! Simulate command - compare the flat-rate and standard regimes

use crate::cmd::{format_eur, round};
use crate::tax::{
    parse_amount, read_input_json, simulate, ActivityCategory, Comparison, ContributionScheme,
    RegimeResult, SimulationError, SimulationInput, SubstituteRate, ACTIVITY_CATEGORIES,
};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// Gross annual revenue in euro
    #[arg(short, long, required_unless_present = "input")]
    revenue: Option<String>,

    /// ATECO category key (see `taxami categories`), defaults to servizi
    #[arg(short, long, conflicts_with = "coefficient")]
    category: Option<String>,

    /// Profitability coefficient between 0 and 1, instead of a category
    #[arg(long)]
    coefficient: Option<String>,

    /// Flat-rate substitute tax percentage
    #[arg(long, value_enum, default_value_t = RateArg::Fifteen)]
    rate: RateArg,

    /// INPS contribution scheme
    #[arg(short, long, value_enum, default_value_t = SchemeArg::SeparateManagement)]
    scheme: SchemeArg,

    /// Deductible costs in euro, used by the standard regime
    #[arg(long, default_value = "0")]
    costs: String,

    /// JSON simulation input document, instead of the flags above
    #[arg(short, long, conflicts_with_all = ["revenue", "category", "coefficient"])]
    input: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RateArg {
    /// 5%, for the first five years of a new activity
    #[value(name = "5")]
    Five,
    #[default]
    #[value(name = "15")]
    Fifteen,
}

impl From<RateArg> for SubstituteRate {
    fn from(arg: RateArg) -> Self {
        match arg {
            RateArg::Five => SubstituteRate::StartUp,
            RateArg::Fifteen => SubstituteRate::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SchemeArg {
    /// Gestione Separata, 26.07%
    #[default]
    #[value(alias = "separata")]
    SeparateManagement,
    /// Artigiani e commercianti, 24% with a 4200 minimum
    #[value(alias = "artigiani")]
    ArtisansTraders,
}

impl From<SchemeArg> for ContributionScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::SeparateManagement => ContributionScheme::SeparateManagement,
            SchemeArg::ArtisansTraders => ContributionScheme::ArtisansTraders,
        }
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(rename = "Forfetario")]
    forfetario: String,
    #[tabled(rename = "Ordinario")]
    ordinario: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
    input: &'a SimulationInput,
    forfetario: RegimeReport<'a>,
    ordinario: RegimeReport<'a>,
    recommended: crate::tax::Regime,
    difference: String,
}

#[derive(Debug, Serialize)]
struct RegimeReport<'a> {
    #[serde(flatten)]
    result: &'a RegimeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_rate_pct: Option<String>,
}

impl<'a> From<&'a RegimeResult> for RegimeReport<'a> {
    fn from(result: &'a RegimeResult) -> Self {
        RegimeReport {
            result,
            effective_rate_pct: result.effective_rate().map(|r| format!("{:.1}", round(r, 1))),
        }
    }
}

impl SimulateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = self.simulation_input()?;
        let comparison = simulate(&input)?;

        if self.json {
            self.print_json(&input, &comparison)
        } else {
            self.print_text(&input, &comparison);
            Ok(())
        }
    }

    fn simulation_input(&self) -> anyhow::Result<SimulationInput> {
        if let Some(ref path) = self.input {
            let file = File::open(path)
                .map_err(|e| anyhow::anyhow!("could not open {}: {}", path.display(), e))?;
            return read_input_json(BufReader::new(file));
        }

        let revenue = self
            .revenue
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--revenue is required without --input"))?;

        let activity_coefficient = match (&self.coefficient, &self.category) {
            (Some(coefficient), _) => parse_amount("activity coefficient", coefficient)?,
            (None, Some(key)) => resolve_category(key)?.coefficient,
            (None, None) => ActivityCategory::default_category().coefficient,
        };

        Ok(SimulationInput {
            gross_revenue: parse_amount("gross revenue", revenue)?,
            activity_coefficient,
            substitute_rate: self.rate.into(),
            contribution_scheme: self.scheme.into(),
            deductible_costs: parse_amount("deductible costs", &self.costs)?,
        })
    }

    fn print_text(&self, input: &SimulationInput, comparison: &Comparison) {
        println!();
        println!(
            "TAX SIMULATION - revenue {}, coefficient {:.0}%, substitute rate {}, {}",
            format_eur(input.gross_revenue),
            input.activity_coefficient * dec!(100),
            input.substitute_rate,
            input.contribution_scheme
        );
        println!("Deductible costs (ordinario): {}", format_eur(input.deductible_costs));
        println!();

        let forf = &comparison.forfetario;
        let ord = &comparison.ordinario;
        let row = |label, value: fn(&RegimeResult) -> String| ResultRow {
            label,
            forfetario: value(forf),
            ordinario: value(ord),
        };
        let rows = vec![
            row("Taxable income", |r| format_eur(r.taxable_income)),
            row("Taxable base", |r| format_eur(r.taxable_base)),
            row("Tax", |r| format_eur(r.tax_due)),
            row("INPS contributions", |r| format_eur(r.contributions_due)),
            row("Total tax and contributions", |r| format_eur(r.total_burden)),
            row("Estimated net income", |r| format_eur(r.display_net_income())),
            row("Effective tax pressure", |r| {
                r.effective_rate()
                    .map_or("-".to_string(), |rate| format!("{:.1}%", round(rate, 1)))
            }),
        ];

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        if comparison.difference.is_zero() {
            println!(
                "Both regimes leave the same net income; recommending {}",
                comparison.recommended
            );
        } else {
            println!(
                "RECOMMENDED: {} (+{} net income)",
                comparison.recommended,
                format_eur(comparison.difference)
            );
        }
        if comparison.recommended_result().net_income < Decimal::ZERO {
            println!("Note: contributions exceed revenue, net income is negative");
        }
        println!();
        println!(
            "Indicative simulation only: regional/municipal surcharges, deductions and minimum \
             contributions already paid are not considered."
        );
    }

    fn print_json(&self, input: &SimulationInput, comparison: &Comparison) -> anyhow::Result<()> {
        let report = SimulationReport {
            input,
            forfetario: (&comparison.forfetario).into(),
            ordinario: (&comparison.ordinario).into(),
            recommended: comparison.recommended,
            difference: format!("{:.2}", round(comparison.difference, 2)),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

fn resolve_category(key: &str) -> Result<&'static ActivityCategory, SimulationError> {
    ActivityCategory::find(key).ok_or_else(|| SimulationError::InvalidInput {
        field: "category",
        reason: format!(
            "unknown category '{}', expected one of: {}",
            key,
            ACTIVITY_CATEGORIES
                .iter()
                .map(|c| c.key)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}
