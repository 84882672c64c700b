//! Verification harness: run configuration, the observer boundary and the
//! channel pipeline wiring generator, observer and scoreboard together.

use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

use crate::alu::{Alu, ConfigError, Encoding};
use crate::generator::Generator;
use crate::report::Report;
use crate::scoreboard::{RunOutcome, Scoreboard};
use crate::transaction::{Observation, Stimulus, Transaction};

/// Boundary to the system under evaluation: accepts a transaction's inputs
/// and returns whatever the device actually produced. The harness places no
/// timing obligations on implementations.
pub trait Observe {
    fn observe(&mut self, txn: &Transaction) -> Observation;
}

/// Built-in observer: a second, independently constructed evaluation path
/// through the operation model. The default device in the binary, and the
/// baseline for self-check runs.
pub struct ModelObserver {
    alu: Alu,
}

impl ModelObserver {
    pub fn new(width: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            alu: Alu::new(width)?,
        })
    }
}

impl Observe for ModelObserver {
    fn observe(&mut self, txn: &Transaction) -> Observation {
        Observation::from_output(self.alu.evaluate(txn.a, txn.b, txn.ctrl))
    }
}

/// Run configuration, validated before any transaction is generated.
/// `count` of zero is a legal empty run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub count: usize,
    pub width: u32,
    pub encoding: Encoding,
    pub seed: Option<u64>,
    pub report_path: Option<PathBuf>,
    pub max_runtime: Option<Duration>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            count: 20,
            width: 8,
            encoding: Encoding::Simple,
            seed: None,
            report_path: None,
            max_runtime: None,
        }
    }
}

impl HarnessConfig {
    /// Fail fast on configuration the model would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Alu::new(self.width).map(|_| ())
    }
}

/// Drive the full pipeline: generate → observe → score, in issue order.
///
/// The generator and the driver/observer run as separate tasks linked by
/// FIFO channels; scoring stays on the calling task so the verdict log
/// always matches generation order. The run ends when the generator
/// exhausts its count and both channels drain — in-flight transactions are
/// never dropped. `max_runtime` bounds the whole run: on expiry scoring
/// stops between comparisons (cooperatively, never mid-comparison) and the
/// summary covers what was scored.
pub async fn run<O>(config: HarnessConfig, mut observer: O) -> Result<RunOutcome>
where
    O: Observe + Send + 'static,
{
    config.validate()?;
    let alu = Alu::new(config.width)?;
    log::debug!("harness config: {config:?}");

    let report = match &config.report_path {
        Some(path) => Report::with_file(path),
        None => Report::console_only(),
    };
    let mut scoreboard = Scoreboard::new(alu, report);

    let (stim_tx, mut stim_rx) = mpsc::unbounded_channel::<Stimulus>();
    let (obs_tx, mut obs_rx) = mpsc::unbounded_channel::<(Transaction, Observation)>();

    let generator = Generator::new(alu, config.encoding, config.count, config.seed);
    let gen_task = tokio::spawn(async move {
        for stimulus in generator {
            // Consumer gone: stop generating.
            if stim_tx.send(stimulus).is_err() {
                break;
            }
        }
    });

    let drive_task = tokio::spawn(async move {
        while let Some(stimulus) = stim_rx.recv().await {
            let observation = observer.observe(&stimulus.txn);
            if obs_tx.send((stimulus.txn, observation)).is_err() {
                break;
            }
        }
    });

    let deadline = config.max_runtime.map(|limit| Instant::now() + limit);
    loop {
        let next = match deadline {
            Some(deadline) => match timeout_at(deadline, obs_rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    log::warn!("maximum runtime elapsed; reporting partial results");
                    break;
                }
            },
            None => obs_rx.recv().await,
        };
        match next {
            Some((txn, observation)) => {
                let _ = scoreboard.score(txn, observation);
            }
            None => break,
        }
    }

    // On the timeout path this unblocks the producers, which then exit.
    drop(obs_rx);
    gen_task.await?;
    drive_task.await?;

    Ok(scoreboard.into_outcome())
}
