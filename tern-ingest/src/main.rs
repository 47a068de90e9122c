use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use tern_core::Term;
use tern_ingest::BulkLoader;
use tern_search_service::{BackendConfig, RemoteBackend};

#[derive(Parser, Debug)]
#[command(name = "tern-ingest", about = "Bulk N-Triples ingestion into a search index")]
struct Args {
    /// N-Triples files to load, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Search engine base URL.
    #[arg(long, env = "TERN_SEARCH_URL", default_value = "http://localhost:9200")]
    search_url: String,

    /// Bearer token for the search engine.
    #[arg(long, env = "TERN_SEARCH_TOKEN")]
    auth_token: Option<String>,

    /// Target index name.
    #[arg(long, default_value = "triples")]
    index: String,

    /// Named graph IRI attached to every loaded triple.
    #[arg(long)]
    graph: Option<String>,

    /// Documents per bulk batch.
    #[arg(long, default_value_t = tern_ingest::DEFAULT_MAX_ACTIONS)]
    batch_size: usize,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    request_timeout_ms: u64,
}

fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tern_ingest=info,tern_search_service=info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact());
    let _ = tracing::dispatcher::set_global_default(tracing::Dispatch::new(subscriber));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args = Args::parse();
    let start = Instant::now();

    let mut config =
        BackendConfig::new(&args.search_url).with_request_timeout_ms(args.request_timeout_ms);
    if let Some(token) = &args.auth_token {
        config = config.with_auth_token(token);
    }
    let backend = Arc::new(RemoteBackend::from_config(&config)?);

    let graph = match &args.graph {
        Some(iri) if iri.trim().is_empty() => {
            return Err("--graph must not be empty".into());
        }
        Some(iri) => Some(Term::iri(iri)),
        None => None,
    };

    let mut loader =
        BulkLoader::new(backend, &args.index).with_max_actions(args.batch_size);
    if let Some(graph) = graph {
        loader = loader.with_graph(graph);
    }

    for path in &args.files {
        info!(file = %path.display(), "loading");
        loader.load_file(path).await?;
    }
    let stats = loader.finish().await?;

    info!(
        triples = stats.triples,
        batches = stats.batches,
        elapsed_ms = start.elapsed().as_millis() as u64,
        index = %args.index,
        "ingest complete"
    );
    Ok(())
}
