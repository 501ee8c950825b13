use clap::{Parser, Subcommand};

mod cmd;
mod feeds;
mod tax;

/// Italian tax regime simulator and fiscal news aggregator
#[derive(Parser, Debug)]
#[command(name = "taxami", version, about)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare the flat-rate (forfetario) and standard (ordinario) regimes
    Simulate(cmd::simulate::SimulateCommand),
    /// List ATECO activity categories and their profitability coefficients
    Categories(cmd::categories::CategoriesCommand),
    /// Aggregate fiscal news from RSS/Atom feeds
    Articles(cmd::articles::ArticlesCommand),
    /// Print the JSON schema of an input or output document
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Command::Simulate(simulate) => simulate.exec(),
        Command::Categories(categories) => categories.exec(),
        Command::Articles(articles) => articles.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
