use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use archgen::config::{DEFAULT_MODEL, DEFAULT_MODEL_ENDPOINT, ModelConfig, ServiceConfig};
use archgen::display::DEFAULT_SCALE;
use archgen::engine::Graphviz;
use archgen::service::{Generator, router};
use archgen::{animation, diagrams};

#[derive(Parser)]
#[command(name = "archgen", about = "Generate architecture diagrams with Graphviz")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve POST /generate for the diagram editor
    Serve(ServeArgs),
    /// Repair a DOT description and print the editor JSON
    Convert {
        /// Input file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Graphviz binary
        #[arg(long, default_value = "dot")]
        graphviz: String,

        /// Engine-to-editor coordinate scale
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f64,
    },
    /// Render one of the built-in diagrams
    Render {
        diagram: BuiltinDiagram,

        /// Output path (defaults to the diagram's own file name)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Graphviz binary
        #[arg(long, default_value = "dot")]
        graphviz: String,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini REST endpoint
    #[arg(long, default_value = DEFAULT_MODEL_ENDPOINT)]
    endpoint: String,

    /// Engine-to-editor coordinate scale
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Search the web for topic context before prompting
    #[arg(long)]
    web_context: bool,

    /// Graphviz binary
    #[arg(long, default_value = "dot")]
    graphviz: String,
}

impl From<ServeArgs> for ServiceConfig {
    fn from(args: ServeArgs) -> Self {
        ServiceConfig {
            model: ModelConfig {
                api_key: args.api_key,
                model: args.model,
                endpoint: args.endpoint,
            },
            scale: args.scale,
            web_context: args.web_context,
            graphviz: args.graphviz,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BuiltinDiagram {
    DnsHld,
    UberHld,
    UberLld,
    InfluencerLld,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args),
        Command::Convert {
            file,
            graphviz,
            scale,
        } => convert(file, &graphviz, scale),
        Command::Render {
            diagram,
            output,
            graphviz,
        } => render(diagram, output, &graphviz),
    }
}

fn serve(args: ServeArgs) -> Result<()> {
    let addr = format!("{}:{}", args.host, args.port);
    let config = ServiceConfig::from(args);
    if config.model.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /generate will fail until it is");
    }
    let generator = Arc::new(Generator::from_config(config));

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!(%addr, "listening");
        axum::serve(listener, router(generator))
            .await
            .context("server error")
    })
}

fn convert(file: Option<PathBuf>, graphviz: &str, scale: f64) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let graph = archgen::convert_dot(&Graphviz::new(graphviz), &input, scale)?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

fn render(diagram: BuiltinDiagram, output: Option<PathBuf>, graphviz: &str) -> Result<()> {
    let engine = Graphviz::new(graphviz);
    match diagram {
        BuiltinDiagram::InfluencerLld => {
            let d = diagrams::influencer_lld();
            let path = output.unwrap_or_else(|| PathBuf::from(d.output));
            animation::render_png(&engine, &d, &path)?;
        }
        animated => {
            let d = match animated {
                BuiltinDiagram::DnsHld => diagrams::dns_hld(),
                BuiltinDiagram::UberHld => diagrams::uber_hld(),
                _ => diagrams::uber_lld(),
            };
            let path = output.unwrap_or_else(|| PathBuf::from(d.output));
            animation::render_gif(&engine, &d, &path)?;
        }
    }
    Ok(())
}
