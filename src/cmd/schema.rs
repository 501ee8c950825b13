//! Schema command - print the JSON documents the tool reads and writes

use crate::feeds::Article;
use crate::tax::SimulationInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Document to describe
    #[arg(value_enum, default_value = "simulation-input")]
    target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaTarget {
    /// Input accepted by `simulate --input`
    SimulationInput,
    /// Article records written by `articles --json`
    Article,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.target {
            SchemaTarget::SimulationInput => schema_for!(SimulationInput),
            SchemaTarget::Article => schema_for!(Article),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
