//! Categories command - ATECO activity categories and their coefficients

use crate::tax::ACTIVITY_CATEGORIES;
use clap::Args;
use rust_decimal_macros::dec;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Category")]
    label: &'static str,
    #[tabled(rename = "Coefficient")]
    coefficient: String,
}

impl CategoriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&ACTIVITY_CATEGORIES)?);
            return Ok(());
        }

        let rows = ACTIVITY_CATEGORIES.iter().map(|c| CategoryRow {
            key: c.key,
            label: c.label,
            coefficient: format!("{:.0}%", c.coefficient * dec!(100)),
        });
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
