//! Command line front end for CMS map layers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ol_common::admin::summary_rows;
use ol_common::{FormSchema, InMemoryRepository, LayerId, LayerRepository, MapId, SpatialParams};
use ol_layer::{format_summary_table, Catalog};
use ol_protocol::{project, project_map, FeatureInfoGateway, GatewayConfig};

#[derive(Parser, Debug)]
#[command(name = "ol-layer")]
#[command(about = "Inspect CMS map layers and proxy feature-info requests", long_about = None)]
struct Cli {
    /// Layer catalog (YAML)
    #[arg(short, long, env = "OL_CATALOG", default_value = "layers.yaml")]
    catalog: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the client configuration of layers
    Config {
        /// A single layer
        #[arg(short, long, conflicts_with = "map")]
        layer: Option<u64>,

        /// Enabled layers of a map, in draw order
        #[arg(short, long)]
        map: Option<u64>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show the layer list view
    List,

    /// Print the admin edit form description
    Form,

    /// Ask the layer's OGC server about a feature
    FeatureInfo {
        #[arg(short, long)]
        layer: u64,

        /// Feature identifier (WFS)
        #[arg(short, long, default_value = "")]
        feature_id: String,

        /// Map extent of the click: minx,miny,maxx,maxy (WMS)
        #[arg(long, requires_all = ["x", "y", "width", "height"])]
        bbox: Option<String>,

        #[arg(long)]
        x: Option<u32>,

        #[arg(long)]
        y: Option<u32>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Request timeout in seconds
        #[arg(long, env = "OL_REQUEST_TIMEOUT_SECS", default_value = "30")]
        timeout_secs: u64,
    },
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_catalog(path: &Path) -> Result<InMemoryRepository> {
    info!(catalog = %path.display(), "Loading catalog");
    Catalog::from_file(path)?.into_repository().await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Form => {
            println!("{}", serde_json::to_string_pretty(&FormSchema::layer_form())?);
        }
        Commands::Config { layer, map, pretty } => {
            let repo = load_catalog(&cli.catalog).await?;
            let configs = match (layer, map) {
                (Some(id), _) => vec![project(&repo.layer(LayerId(id)).await?)],
                (None, Some(id)) => project_map(&repo.layers_for_map(MapId(id)).await?),
                (None, None) => repo.layers().await?.iter().map(project).collect(),
            };

            let json = if pretty {
                serde_json::to_string_pretty(&configs)?
            } else {
                serde_json::to_string(&configs)?
            };
            println!("{}", json);
        }
        Commands::List => {
            let repo = load_catalog(&cli.catalog).await?;
            let rows = summary_rows(&repo).await?;
            println!("{}", format_summary_table(&rows));
        }
        Commands::FeatureInfo {
            layer,
            feature_id,
            bbox,
            x,
            y,
            width,
            height,
            timeout_secs,
        } => {
            let spatial = match bbox {
                Some(bbox) => Some(SpatialParams::from_click(
                    &bbox,
                    x.unwrap_or_default(),
                    y.unwrap_or_default(),
                    width.unwrap_or_default(),
                    height.unwrap_or_default(),
                )?),
                None => None,
            };

            let repo = load_catalog(&cli.catalog).await?;
            let layer = repo.layer(LayerId(layer)).await?;
            let config = GatewayConfig {
                request_timeout: Duration::from_secs(timeout_secs),
                ..Default::default()
            };
            let gateway = FeatureInfoGateway::http(&config)?;

            info!(layer = %layer.title, feature_id = %feature_id, "Requesting feature info");
            let body = gateway
                .get_feature_info(&layer, &feature_id, spatial.as_ref())
                .await
                .with_context(|| format!("Feature info failed for layer '{}'", layer.title))?;
            println!("{}", body);
        }
    }

    Ok(())
}
