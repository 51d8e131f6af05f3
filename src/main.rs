use anyhow::Context;
use clap::Parser;
use dwelldex::format::{bathrooms_label, bedrooms_label, summary};
use dwelldex::{AppConfig, BrowsingSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dwelldex")]
#[command(about = "Browse and filter property listings")]
#[command(version)]
struct Cli {
    /// Filters as name=value pairs, e.g. `type=house status=for-rent`.
    /// Names: location, type, priceRange, bedrooms, status
    #[arg(value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

/// Split a `name=value` argument
fn parse_filter(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", arg))?;
    if name.is_empty() {
        return Err(format!("missing filter name in '{}'", arg));
    }
    Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 DwellDex - property listings");

    let config = AppConfig::from_env();
    let mut session = BrowsingSession::from_config(&config)?;

    for (name, value) in &cli.filters {
        session
            .set_filter(name, value)
            .with_context(|| format!("Invalid filter {}={}", name, value))?;
    }
    if session.criteria().is_unfiltered() {
        info!("No filters given, showing every listing");
    }

    let total = session.load().await?;
    let properties = session.apply_filters();

    info!("Showing {} of {} properties", properties.len(), total);

    for (i, property) in properties.iter().enumerate() {
        println!("{}. {}", i + 1, summary(property));
        println!(
            "   {}, {}, {} sqft",
            bedrooms_label(property.bedrooms),
            bathrooms_label(property.bathrooms),
            property.area
        );
        println!("   {}", property.address.street);
        println!("   ID: {}", property.id);
        println!();
    }

    let json = serde_json::to_string_pretty(properties)?;
    tokio::fs::write(&config.output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!("💾 Saved filtered properties to {}", config.output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_filter_pairs() {
        let cli = Cli::try_parse_from(["dwelldex", "type=house", "location=San Francisco", "type="])
            .unwrap();
        assert_eq!(
            cli.filters,
            [
                ("type".to_string(), "house".to_string()),
                ("location".to_string(), "San Francisco".to_string()),
                ("type".to_string(), String::new()),
            ]
        );

        let cli = Cli::try_parse_from(["dwelldex"]).unwrap();
        assert!(cli.filters.is_empty());
    }

    #[test]
    fn test_cli_rejects_malformed_pairs() {
        assert!(Cli::try_parse_from(["dwelldex", "house"]).is_err());
        assert!(Cli::try_parse_from(["dwelldex", "=house"]).is_err());
    }
}
