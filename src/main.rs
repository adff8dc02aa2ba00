//! edam-pim CLI - enrich an eDAM asset export with PIM assignments
//!
//! ```bash
//! edam-pim                      # process the default export file
//! edam-pim assets.csv           # process a specific file
//! edam-pim assets.csv -c url    # use a different URL column
//! ```
//!
//! Running with no arguments reproduces the original batch job: the
//! default input file and URL column are the export's fixed names.

use clap::Parser;
use edam_pim::{run, RunOptions, DEFAULT_INPUT_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_URL_COLUMN};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "edam-pim")]
#[command(about = "Enrich an eDAM asset CSV export with PIM product and item assignments", long_about = None)]
struct Cli {
    /// Input CSV file (eDAM asset export)
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Name of the column holding each asset's URL
    #[arg(short = 'c', long, default_value = DEFAULT_URL_COLUMN)]
    url_column: String,

    /// Per-request download timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let options = RunOptions {
        input: cli.input,
        url_column: cli.url_column,
        timeout: Duration::from_secs(cli.timeout),
    };

    let started = Instant::now();
    match run(&options).await {
        Ok(_) => {
            println!("Elapsed: {:.3?}", started.elapsed());
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
