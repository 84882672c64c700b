pub mod alu;
pub mod generator;
pub mod harness;
pub mod report;
pub mod scoreboard;
pub mod transaction;

pub use alu::{Alu, AluOutput, ConfigError, ControlFields, Encoding};
pub use generator::Generator;
pub use harness::{run, HarnessConfig, ModelObserver, Observe};
pub use report::Report;
pub use scoreboard::{RunOutcome, RunSummary, Scoreboard};
pub use transaction::{FourState, Observation, Stimulus, Transaction, VerdictRecord};
