use clap::Parser;
use onboarding::{
    application::pincode_lookup::PincodeResolver,
    config::Config,
    domain::{
        geo::{PINCODE_LEN, PostalLookup},
        vendor::sanitize,
    },
    infrastructure::postal::{InMemoryPostalLookup, IndiaPostLookup},
};
use std::sync::Arc;

/// Resolves one pincode the way the onboarding form does and prints the
/// settled lookup view as JSON.
#[derive(Parser, Debug)]
#[command(name = "onboarding")]
#[command(about = "Resolve an Indian pincode to its state and city")]
struct Args {
    /// Six digit pincode; spaces and separators are ignored
    #[arg(value_parser = parse_pincode)]
    pincode: String,

    /// Use the built-in head office table instead of the postal directory
    #[arg(long)]
    offline: bool,
}

fn parse_pincode(raw: &str) -> Result<String, String> {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if digits != PINCODE_LEN {
        return Err(format!("expected {PINCODE_LEN} digits, got {raw:?}"));
    }
    Ok(sanitize::pincode(raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,onboarding=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let lookup: Arc<dyn PostalLookup> = if args.offline {
        Arc::new(InMemoryPostalLookup::seeded())
    } else {
        Arc::new(IndiaPostLookup::new(
            config.postal_lookup_base_url.clone(),
            config.postal_lookup_user_agent.as_deref(),
        )?)
    };

    let resolver = PincodeResolver::new(lookup, config.lookup())?;
    resolver.set_pincode(&args.pincode)?;
    let view = resolver.settled().await;
    resolver.shutdown();

    println!("{}", serde_json::to_string_pretty(&view)?);

    if let Some(error) = view.error {
        anyhow::bail!("pincode resolution failed: {error}");
    }
    Ok(())
}
