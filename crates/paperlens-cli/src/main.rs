//! paperlens - query a tagged dataset of AI-in-medicine papers
//!
//! Loads the paper dataset, applies search and category filters, and
//! prints KPI summaries, distributions and the paginated paper table.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "paperlens")]
#[command(about = "Filter, summarize and browse a tagged paper dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./paperlens.toml or ~/.config/paperlens/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset file, JSON array of records (optionally gzipped)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// KPI cards, yearly trend and tag distributions for the filtered set
    Summary(cmd::summary::SummaryArgs),
    /// Paginated table of the filtered papers
    List(cmd::list::ListArgs),
    /// Filter options with their counts over the whole dataset
    Facets(cmd::facets::FacetsArgs),
    /// Show one paper by PMID
    Show(cmd::show::ShowArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    paperlens_core::init_logging(cli.quiet, cli.debug);

    let config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // CLI flag wins over config
    let data = cli.data.unwrap_or_else(|| config.data.path.clone());

    match cli.command {
        Command::Summary(args) => cmd::summary::run(args, &data, &config),
        Command::List(args) => cmd::list::run(args, &data, &config),
        Command::Facets(args) => cmd::facets::run(args, &data, &config),
        Command::Show(args) => cmd::show::run(args, &data, &config),
        Command::Config => {
            let mut table = cmd::new_table(&["Setting", "Value"]);

            let data_cell = if data.exists() {
                data.display().to_string()
            } else {
                format!("{} (missing)", data.display())
            };
            table.add_row(vec!["Dataset".to_string(), data_cell]);
            table.add_row(vec![
                "Page size".to_string(),
                config.view.page_size.to_string(),
            ]);
            table.add_row(vec![
                "Tags per row".to_string(),
                config.view.tag_limit.to_string(),
            ]);
            table.add_row(vec![
                "KPI entries".to_string(),
                config.view.top_n.to_string(),
            ]);
            table.add_row(vec!["Sort".to_string(), config.view.sort.clone()]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
