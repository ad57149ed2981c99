//! SeCa Storage Function
//!
//! Composition function deriving an IONOS Cloud datacenter and volume for
//! every `XSeCaStorage` storage workspace.
//!
//! # Commands
//!
//! ```text
//! seca-storage-function serve                      run the function over HTTP
//! seca-storage-function render --composite xr.yaml run once offline, print YAML
//! seca-storage-function crd                        print the composite CRD
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use kube::CustomResourceExt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seca_storage_function::function::render;
use seca_storage_function::{
    ApiServer, ApiServerConfig, CompositionConfig, Error, FunctionMetrics, Result, Scheme,
    StorageFunction, VolumeKey, XSeCaStorage,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// SeCa Storage Function - composes datacenters and volumes for storage workspaces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(flatten)]
    composition: CompositionArgs,

    #[command(subcommand)]
    command: Command,
}

/// Settings of the composition itself
#[derive(Args, Debug)]
struct CompositionArgs {
    /// Prefix of every desired resource key
    #[arg(long, env = "RESOURCE_PREFIX", default_value = "xservers", global = true)]
    resource_prefix: String,

    /// Separator between workspace and "volume" in volume names ('-' or '_')
    #[arg(long, env = "VOLUME_SEPARATOR", default_value_t = '-', global = true)]
    volume_separator: char,

    /// Rewrite region codes like de-txl into locations like de/txl
    #[arg(
        long,
        env = "NORMALIZE_REGION",
        default_value_t = true,
        action = clap::ArgAction::Set,
        global = true
    )]
    normalize_region: bool,

    /// Key the volume's desired entry by its name or its identity
    #[arg(long, env = "VOLUME_KEY", default_value = "name", global = true)]
    volume_key: VolumeKey,

    /// Freshness interval returned to the runtime, in seconds
    #[arg(long, env = "FUNCTION_TTL_SECS", default_value = "60", global = true)]
    ttl_secs: u64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the function over HTTP
    Serve(ServeArgs),
    /// Run the function once against local files and print the response
    Render(RenderArgs),
    /// Print the XSeCaStorage CustomResourceDefinition
    Crd,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Function API bind address
    #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:9443")]
    api_addr: String,

    /// Health server bind address
    #[arg(long, env = "HEALTH_ADDR", default_value = "0.0.0.0:8081")]
    health_addr: String,

    /// Metrics server bind address
    #[arg(long, env = "METRICS_ADDR", default_value = "0.0.0.0:8080")]
    metrics_addr: String,

    /// Max request body size in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "10485760")]
    max_body_bytes: usize,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// YAML file holding the composite resource
    #[arg(long)]
    composite: PathBuf,

    /// YAML mapping of composed resource name to observed document
    #[arg(long)]
    observed: Option<PathBuf>,

    /// YAML mapping of composed resource name to desired document
    #[arg(long)]
    desired: Option<PathBuf>,
}

impl CompositionArgs {
    fn config(&self) -> Result<CompositionConfig> {
        let config = CompositionConfig {
            resource_prefix: self.resource_prefix.clone(),
            volume_separator: self.volume_separator,
            normalize_region: self.normalize_region,
            volume_key: self.volume_key,
            ttl: Duration::from_secs(self.ttl_secs),
        };
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    let config = cli
        .composition
        .config()
        .context("invalid composition settings")?;

    // Kinds the function may emit are registered once, here
    let scheme = Arc::new(Scheme::ionos());
    let function = StorageFunction::new(config, scheme);

    match cli.command {
        Command::Serve(args) => serve(args, function).await,
        Command::Render(args) => render_once(args, &function),
        Command::Crd => {
            let crd = serde_yaml::to_string(&XSeCaStorage::crd())
                .context("cannot encode CustomResourceDefinition")?;
            print!("{}", crd);
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs, function: Arc<StorageFunction>) -> anyhow::Result<()> {
    let config = function.config();
    info!("Starting SeCa Storage Function");
    info!("  Version: {}", seca_storage_function::VERSION);
    info!("  Function API: {}", args.api_addr);
    info!("  Resource prefix: {}", config.resource_prefix);
    info!("  Volume separator: {:?}", config.volume_separator);
    info!("  Volume key: {}", config.volume_key);
    info!("  Normalize region: {}", config.normalize_region);

    let metrics = Arc::new(FunctionMetrics::new()?);

    // Start health server
    let health_addr = args.health_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = run_health_server(&health_addr).await {
            error!("Health server error: {}", e);
        }
    });

    // Start metrics server
    let metrics_addr = args.metrics_addr.clone();
    let server_metrics = metrics.clone();
    tokio::spawn(async move {
        if let Err(e) = run_metrics_server(&metrics_addr, server_metrics).await {
            error!("Metrics server error: {}", e);
        }
    });

    let api_config = ApiServerConfig {
        addr: args.api_addr.parse().map_err(|e| {
            Error::Configuration(format!("Invalid function API address: {}", e))
        })?,
        max_body_size: args.max_body_bytes,
    };
    let api_server = ApiServer::new(api_config, function, metrics);

    let shutdown = api_server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, shutting down");
            let _ = shutdown.send(());
        }
    });

    api_server.run().await?;

    info!("Function shutdown complete");
    Ok(())
}

fn render_once(args: RenderArgs, function: &StorageFunction) -> anyhow::Result<()> {
    let composite = render::load_document(&args.composite)
        .with_context(|| format!("cannot load composite from {}", args.composite.display()))?;
    let observed = match &args.observed {
        Some(path) => render::load_resources(path)
            .with_context(|| format!("cannot load observed resources from {}", path.display()))?,
        None => Default::default(),
    };
    let desired = match &args.desired {
        Some(path) => render::load_resources(path)
            .with_context(|| format!("cannot load desired resources from {}", path.display()))?,
        None => Default::default(),
    };

    let rsp = render::render(function, composite, observed, desired);
    print!("{}", render::to_yaml(&rsp)?);

    if rsp.is_fatal() {
        anyhow::bail!("function returned a fatal result");
    }
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(cli: &Cli) {
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "tower=warn", "tower_http=info", "axum=info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // stdout is reserved for rendered documents
    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

// =============================================================================
// Health Server
// =============================================================================

async fn run_health_server(addr: &str) -> Result<()> {
    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Body, Request, Response, Server, StatusCode};

    let make_svc = make_service_fn(|_conn| async {
        Ok::<_, std::convert::Infallible>(service_fn(|req: Request<Body>| async move {
            let response = match req.uri().path() {
                "/healthz" | "/livez" | "/readyz" => Response::new(Body::from("ok")),
                _ => {
                    let mut response = Response::new(Body::from("not found"));
                    *response.status_mut() = StatusCode::NOT_FOUND;
                    response
                }
            };
            Ok::<_, std::convert::Infallible>(response)
        }))
    });

    let addr: SocketAddr = addr.parse().map_err(|e| {
        Error::Configuration(format!("Invalid health server address: {}", e))
    })?;

    info!("Health server listening on {}", addr);
    Server::bind(&addr)
        .serve(make_svc)
        .await
        .map_err(|e| Error::Internal(format!("Health server error: {}", e)))?;

    Ok(())
}

// =============================================================================
// Metrics Server
// =============================================================================

async fn run_metrics_server(addr: &str, metrics: Arc<FunctionMetrics>) -> Result<()> {
    use hyper::header::CONTENT_TYPE;
    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Body, Request, Response, Server, StatusCode};

    let make_svc = make_service_fn(move |_conn| {
        let metrics = metrics.clone();
        async move {
            Ok::<_, std::convert::Infallible>(service_fn(move |req: Request<Body>| {
                let metrics = metrics.clone();
                async move {
                    let response = match req.uri().path() {
                        "/metrics" => match metrics.encode() {
                            Ok((content_type, buffer)) => {
                                let mut response = Response::new(Body::from(buffer));
                                if let Ok(value) = content_type.parse() {
                                    response.headers_mut().insert(CONTENT_TYPE, value);
                                }
                                response
                            }
                            Err(e) => {
                                let mut response = Response::new(Body::from(e.to_string()));
                                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                                response
                            }
                        },
                        _ => {
                            let mut response = Response::new(Body::from("not found"));
                            *response.status_mut() = StatusCode::NOT_FOUND;
                            response
                        }
                    };
                    Ok::<_, std::convert::Infallible>(response)
                }
            }))
        }
    });

    let addr: SocketAddr = addr.parse().map_err(|e| {
        Error::Configuration(format!("Invalid metrics server address: {}", e))
    })?;

    info!("Metrics server listening on {}", addr);
    Server::bind(&addr)
        .serve(make_svc)
        .await
        .map_err(|e| Error::Internal(format!("Metrics server error: {}", e)))?;

    Ok(())
}
