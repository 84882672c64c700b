use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use eyre::Result;

use alu_sim::{run, Encoding, HarnessConfig, ModelObserver};

#[derive(Parser, Debug)]
#[command(
    name = "alu-sim",
    about = "Randomized self-checking verification run against the ALU golden model"
)]
struct Cli {
    /// Number of transactions to generate.
    #[arg(short, long, default_value_t = 20)]
    count: usize,

    /// Operand bit-width (8, 16, 32 or 64).
    #[arg(short, long, default_value_t = 8)]
    width: u32,

    /// Control-field encoding of the ALU variant under test.
    #[arg(short, long, value_enum, default_value = "simple")]
    encoding: CliEncoding,

    /// Deterministic RNG seed for reproducible runs.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Report file; verdict lines are mirrored here.
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Maximum wall-clock runtime in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliEncoding {
    Simple,
    Mips,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    println!("🚀 ALU verification run starting...");

    let config = HarnessConfig {
        count: cli.count,
        width: cli.width,
        encoding: match cli.encoding {
            CliEncoding::Simple => Encoding::Simple,
            CliEncoding::Mips => Encoding::Mips,
        },
        seed: cli.seed,
        report_path: cli.report,
        max_runtime: cli.timeout_secs.map(Duration::from_secs),
    };

    let observer = ModelObserver::new(config.width)?;
    let outcome = run(config, observer).await?;

    let summary = outcome.summary;
    println!(
        "Total: {} Pass: {} Fail: {}",
        summary.total, summary.passed, summary.failed
    );
    if summary.is_green() {
        println!("🎉 All transactions passed!");
        Ok(())
    } else {
        Err(eyre::eyre!("{} transaction(s) failed", summary.failed))
    }
}
