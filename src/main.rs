use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use deed_discovery::cli::{Cli, Commands, DiscoverArgs, ExportArgs, ViewArgs};
use deed_discovery::discovery::{CriteriaPolicy, DiscoveryEngine, DiscoveryPage};
use deed_discovery::models::PropertyRecord;
use deed_discovery::stores::{PropertyStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays clean for --json
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.store_config();
    let store = config.open_property_store().await?;
    info!("🏠 Using {} property store", store.source_name());

    match cli.command {
        Commands::Discover(args) => run_discover(&config, store.as_ref(), args).await,
        Commands::View(args) => run_view(store.as_ref(), args).await,
        Commands::Export(args) => run_export(store.as_ref(), args).await,
    }
}

async fn run_discover(
    config: &StoreConfig,
    store: &dyn PropertyStore,
    args: DiscoverArgs,
) -> Result<()> {
    let records = store.list().await?;
    let shares = config
        .open_share_ledger()
        .await?
        .shares_for(&config.user)
        .await?;
    info!("User {} holds shares in {} properties", config.user, shares.len());

    let policy = if args.lenient {
        CriteriaPolicy::Lenient
    } else {
        CriteriaPolicy::Strict
    };
    let now = args.now.unwrap_or_else(Utc::now);
    let raw = args.raw_criteria();
    let result = DiscoveryEngine::new().discover_raw(&records, &raw, policy, &shares, now);
    let page = match result {
        Ok(page) => page,
        Err(err) if args.json => {
            let body = serde_json::json!({ "error": err.error_code(), "message": err.to_string() });
            println!("{}", body);
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }
    Ok(())
}

async fn run_view(store: &dyn PropertyStore, args: ViewArgs) -> Result<()> {
    let views = store.record_view(&args.id).await?;
    let property = store
        .get(&args.id)
        .await?
        .with_context(|| format!("Property {} disappeared", args.id))?;
    print_property(1, &property);
    info!("Property {} has {} views", args.id, views);
    Ok(())
}

async fn run_export(store: &dyn PropertyStore, args: ExportArgs) -> Result<()> {
    let properties = store.list().await?;
    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let json = serde_json::to_string_pretty(&properties)?;
    tokio::fs::write(args.out.join("properties.json"), json).await?;

    for property in &properties {
        property.validate()?;
        let prop_json = serde_json::to_string_pretty(property)?;
        tokio::fs::write(args.out.join(format!("{}.json", property.id)), prop_json).await?;
    }

    info!("💾 Exported {} properties to {}", properties.len(), args.out.display());
    Ok(())
}

fn print_page(page: &DiscoveryPage) {
    if page.is_empty() {
        println!("No properties found ({} matched)", page.total_matched);
        return;
    }

    println!(
        "Page {}/{} ({} matched)\n",
        page.page,
        page.total_pages(),
        page.total_matched
    );
    let offset = (page.page - 1) * page.page_size;
    for (i, property) in page.items.iter().enumerate() {
        print_property(offset + i + 1, property);
    }
}

fn print_property(rank: usize, property: &PropertyRecord) {
    println!("{}. {} (${})", rank, property.title, property.price_major());
    println!("   {}, {}, {}", property.address, property.city, property.state);
    println!(
        "   {} · {} · {}",
        property.property_type, property.ownership_type, property.status
    );
    if let (Some(available), Some(total)) = (property.available_shares, property.total_shares) {
        println!("   Shares: {}/{} available", available, total);
    }
    if let Some(rating) = property.rating {
        println!("   Rating: {:.1}", rating);
    }
    println!("   Views: {}", property.views);
    println!("   ID: {}", property.id);
    println!();
}
