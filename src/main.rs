use anyhow::Context;
use clap::Parser;
use proximity_locator::adapters::csv_source::load_locations;
use proximity_locator::config::toml_config::DEFAULT_RADIUS_MILES;
use proximity_locator::config::Command;
use proximity_locator::utils::{logger, validation::Validate};
use proximity_locator::{
    distance_miles, format_postcode, is_valid_uk_postcode, CliConfig, Coordinates, LocatorError,
    ProximityLocator, TomlConfig, DISTANCE_OPTIONS,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match cli.command.clone() {
        Command::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let a = Coordinates::new(lat1, lon1)?;
            let b = Coordinates::new(lat2, lon2)?;
            println!("{} miles", distance_miles(a, b));
        }
        Command::Validate { postcode } => {
            if is_valid_uk_postcode(&postcode) {
                println!("✅ valid: {}", format_postcode(&postcode));
            } else {
                println!("❌ invalid: {}", postcode);
                std::process::exit(1);
            }
        }
        Command::Radii => {
            for option in DISTANCE_OPTIONS {
                println!("{:>4}  {}", option.miles, option.label);
            }
        }
        Command::Resolve { postcode } => {
            let (locator, _) = build_locator(&cli)?;
            match locator.resolve(&postcode).await {
                Some(c) => println!("{}: {}, {}", format_postcode(&postcode), c.latitude, c.longitude),
                None => {
                    println!("no coordinates available for '{}'", postcode);
                    std::process::exit(2);
                }
            }
        }
        Command::Search {
            postcode,
            candidates,
            radius,
            json,
        } => {
            let (locator, default_radius) = build_locator(&cli)?;
            let radius = radius.unwrap_or(default_radius);
            let records = load_locations(&candidates)
                .with_context(|| format!("failed to load candidates from {}", candidates))?;

            match locator.search(&postcode, records, radius).await {
                Ok(ranked) if json => {
                    println!("{}", serde_json::to_string_pretty(&ranked)?);
                }
                Ok(ranked) => {
                    println!(
                        "📍 {} result(s) within {} miles of {}",
                        ranked.len(),
                        radius,
                        format_postcode(&postcode)
                    );
                    for r in &ranked {
                        let postcode = r
                            .location
                            .postcode
                            .as_deref()
                            .map(format_postcode)
                            .unwrap_or_default();
                        println!("{:>5} mi  {}  {}", r.distance_miles, r.location.town, postcode);
                    }
                }
                Err(e) => {
                    tracing::warn!("Search failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(exit_code(&e));
                }
            }

            let stats = locator.cache_stats();
            tracing::debug!(
                "Cache: {} hits, {} misses, {} entries",
                stats.hits,
                stats.misses,
                stats.entries
            );
        }
    }

    Ok(())
}

type CliLocator = ProximityLocator<
    proximity_locator::PostcodesIoClient,
    Box<dyn proximity_locator::domain::ports::CoordinateCache>,
>;

/// Builds the locator from the config file when one is given, otherwise from flags.
fn build_locator(cli: &CliConfig) -> anyhow::Result<(CliLocator, u32)> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            cli.apply_overrides(&mut config);
            config.validate()?;
            Ok((ProximityLocator::from_config(&config)?, config.default_radius_miles()))
        }
        None => Ok((ProximityLocator::from_config(cli)?, DEFAULT_RADIUS_MILES)),
    }
}

fn exit_code(error: &LocatorError) -> i32 {
    if error.is_lookup_miss() {
        2
    } else {
        1
    }
}
