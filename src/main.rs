//! dbt-extractor CLI - Main entry point.

use dbt_extractor::cli::{Cli, Commands};
use dbt_extractor::output;
use dbt_extractor::{observability, DbtExtractor, Record};

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run(cli) {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Extract(args) => {
            let config = cli.resolve_config(Some(&args.overrides))?;
            observability::init(&config.observability)?;

            let extractor = DbtExtractor::new(config)?;
            let stats = extractor.stats().clone();
            let records: Vec<Record> = extractor.collect();

            let stdout = std::io::stdout();
            output::write_records(&mut stdout.lock(), &records, args.format)?;

            if args.stats {
                output::print_header("Extraction statistics");
                output::print_kv("Nodes seen", stats.nodes_seen);
                output::print_kv("Models extracted", stats.models_extracted);
                output::print_kv("Skipped (not a model)", stats.skipped_not_model);
                output::print_kv("Skipped (not in catalog)", stats.skipped_not_in_catalog);
                output::print_kv("Skipped (schema filter)", stats.skipped_by_schema);
                output::print_kv("Records", stats.records_emitted);
            }
        }

        Commands::Config(overrides) => {
            let config = cli.resolve_config(Some(overrides))?;
            print!("{}", config.to_toml()?);
        }

        Commands::Version => {
            println!("dbt-extractor {}", env!("CARGO_PKG_VERSION"));
            println!("Scope: {}", dbt_extractor::SCOPE);
        }
    }

    Ok(())
}
