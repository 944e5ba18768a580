use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vert::tools::{export_to_csv, export_to_json, import_from_csv, import_from_json};
use vert::{ExportOptions, Graph, GraphConfig, ImportOptions, VertexId};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "vert")]
#[command(about = "Inspect, import and export persistent vert graphs", long_about = None)]
struct Args {
    /// Database directory (defaults to VERT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Graph name inside the database (defaults to VERT_GRAPH_NAME)
    #[arg(short, long, global = true)]
    graph: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print vertex and edge counts
    Stats,

    /// Write the graph to a file
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output file (the edge list for CSV)
        #[arg(short, long)]
        output: PathBuf,

        /// Vertex file for CSV (defaults to `<output>_vertices.csv`)
        #[arg(long)]
        vertices_output: Option<PathBuf>,

        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Merge a file into the graph
    Import {
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Input file (the edge list for CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Optional vertex file for CSV
        #[arg(long)]
        vertices: Option<PathBuf>,

        /// Skip invalid rows instead of failing
        #[arg(long)]
        skip_errors: bool,
    },

    /// Print the shortest path between two vertices
    Path {
        /// Start vertex (JSON id, or bare text for a string id)
        from: String,
        /// End vertex
        to: String,
    },

    /// List vertices reachable from a vertex
    Reachable {
        from: String,

        #[arg(short, long, default_value_t = 3)]
        depth: usize,
    },
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &Args) -> Result<GraphConfig> {
    let mut config = GraphConfig::from_env().context("reading configuration from environment")?;
    if let Some(db) = &args.db {
        config.path = Some(db.clone());
    }
    if let Some(graph) = &args.graph {
        config.graph_name = graph.clone();
    }
    if config.path.is_none() {
        bail!("no database given: pass --db or set VERT_DB_PATH");
    }
    Ok(config)
}

fn sibling_vertices_file(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    output.with_file_name(format!("{}_vertices.csv", stem))
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let graph = Graph::from_config(&config)
        .with_context(|| format!("opening graph {:?} at {:?}", config.graph_name, config.path))?;

    match args.command {
        Command::Stats => {
            println!("vertices: {}", graph.vertices().len().await?);
            println!("edges:    {}", graph.edges().len().await?);
        }
        Command::Export {
            format,
            output,
            vertices_output,
            compact,
        } => {
            let options = ExportOptions {
                pretty_json: !compact,
                ..Default::default()
            };
            let (vertices, edges) = match format {
                Format::Json => export_to_json(graph.store().clone(), &output, options).await?,
                Format::Csv => {
                    let vertices_output =
                        vertices_output.unwrap_or_else(|| sibling_vertices_file(&output));
                    export_to_csv(graph.store().clone(), &vertices_output, &output, options).await?
                }
            };
            println!("exported {} vertices and {} edges", vertices, edges);
        }
        Command::Import {
            format,
            input,
            vertices,
            skip_errors,
        } => {
            let options = ImportOptions {
                skip_errors,
                ..Default::default()
            };
            let stats = match format {
                Format::Json => import_from_json(graph.store().clone(), &input, options).await?,
                Format::Csv => {
                    import_from_csv(graph.store().clone(), vertices.as_ref(), &input, options)
                        .await?
                }
            };
            println!(
                "imported {} vertices and {} edges ({} skipped)",
                stats.vertices_imported,
                stats.edges_imported,
                stats.vertices_skipped + stats.edges_skipped
            );
        }
        Command::Path { from, to } => {
            let from = VertexId::parse_lenient(&from);
            let to = VertexId::parse_lenient(&to);
            match graph.shortest_path(from.clone(), to.clone()).await? {
                Some(path) => {
                    let hops: Vec<String> = path.vertices.iter().map(|v| v.to_string()).collect();
                    println!("{} ({} hops)", hops.join(" -> "), path.len());
                }
                None => println!("no path from {} to {}", from, to),
            }
        }
        Command::Reachable { from, depth } => {
            for vid in graph.reachable(VertexId::parse_lenient(&from), depth).await? {
                println!("{}", vid);
            }
        }
    }

    graph.close()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);
    run(args).await
}
