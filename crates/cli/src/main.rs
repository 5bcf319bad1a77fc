use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "troupe", about = "Troupe — multi-agent delegation gateway")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Config file path (overrides discovery).
    #[arg(long, global = true, env = "TROUPE_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server (default when no subcommand is provided).
    Gateway,
    /// List the models a tier can access.
    Models {
        #[arg(long, default_value = "free")]
        tier: String,
    },
    /// Resolve which model an agent would use.
    Resolve {
        /// Agent id (e.g. "mei").
        agent: String,
        #[arg(long, default_value = "free")]
        tier: String,
    },
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn load_config(cli: &Cli) -> troupe_config::TroupeConfig {
    let mut config = match &cli.config {
        Some(path) => troupe_config::load_config(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            troupe_config::TroupeConfig::default()
        }),
        None => troupe_config::discover_and_load(),
    };
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config
}

fn build_resolver(config: &troupe_config::TroupeConfig) -> troupe_routing::ModelResolver {
    let catalog = std::sync::Arc::new(troupe_catalog::CatalogStore::new(
        config.catalog.path.clone(),
    ));
    let preferences = troupe_config::PreferenceStore::new(config.preferences.dir.clone());
    troupe_routing::ModelResolver::new(catalog, preferences)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let config = load_config(&cli);

    match cli.command.unwrap_or(Commands::Gateway) {
        Commands::Gateway => {
            info!(version = env!("CARGO_PKG_VERSION"), "starting troupe gateway");
            troupe_gateway::start_gateway(&config).await?;
        },
        Commands::Models { tier } => {
            let tier: troupe_common::Tier = tier.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
            let resolver = build_resolver(&config);
            for model in resolver.list_available_models(tier) {
                println!("{}::{} (requires {})", model.provider, model.id, model.tier);
            }
        },
        Commands::Resolve { agent, tier } => {
            let tier: troupe_common::Tier = tier.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
            let resolver = build_resolver(&config);
            let result = resolver.resolve(&agent, tier);
            println!("{}", serde_json::to_string_pretty(&result)?);
        },
    }

    Ok(())
}
