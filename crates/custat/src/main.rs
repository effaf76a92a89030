//! custat - Interactive TUI dashboard for a remote customer dataset.
//!
//! Renders aggregate charts and a searchable/sortable/paginated customer
//! table backed by the customer REST API.
//!
//! Usage:
//!   custat                                  # default API endpoint
//!   custat --url http://10.0.0.5:3000/api   # custom API endpoint
//!   custat --mock                           # offline demo data

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use custat_core::api::{CustomerApi, HttpApi, MockApi};
use custat_core::tui::App;

use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Default base URL of the customer REST API.
const DEFAULT_URL: &str = "http://127.0.0.1:3000/api";

/// Interactive TUI dashboard for customer analytics.
#[derive(Parser)]
#[command(name = "custat", about = "Customer analytics dashboard")]
struct Args {
    /// Base URL of the customer REST API.
    #[arg(long, value_name = "URL", default_value = DEFAULT_URL, env = "CUSTAT_URL")]
    url: String,

    /// Run against a built-in offline dataset instead of a server.
    #[arg(long)]
    mock: bool,

    /// Redraw tick interval in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 250)]
    tick: u64,
}

fn main() {
    // Logs go to stderr and stay out of the alternate screen; enable with
    // RUST_LOG when debugging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api: Arc<dyn CustomerApi> = if args.mock {
        Arc::new(MockApi::new())
    } else {
        match HttpApi::new(&args.url) {
            Ok(api) => Arc::new(api),
            Err(e) => {
                eprintln!("Error: invalid API endpoint '{}': {}", args.url, e);
                std::process::exit(1);
            }
        }
    };

    let app = App::new(api, Duration::from_millis(args.tick.max(50)));
    if let Err(e) = app.run() {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
