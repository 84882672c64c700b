//! Golden-model scoreboard: compares observations against independently
//! recomputed predictions and keeps the ordered verdict log.

use crate::alu::{Alu, ControlFields};
use crate::report::Report;
use crate::transaction::{Observation, Transaction, VerdictRecord};

/// Per-run pass/fail accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// A run is green iff nothing failed.
    pub fn is_green(&self) -> bool {
        self.failed == 0
    }
}

/// Everything a finished run produced: the summary plus the verdict log in
/// transaction-issue order.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub records: Vec<VerdictRecord>,
}

/// Compares each observation against the golden model and records verdicts
/// in arrival order. A mismatch is a FAIL verdict, never an error; scoring
/// always continues.
pub struct Scoreboard {
    alu: Alu,
    report: Report,
    records: Vec<VerdictRecord>,
    summary: RunSummary,
}

impl Scoreboard {
    pub fn new(alu: Alu, report: Report) -> Self {
        Self {
            alu,
            report,
            records: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Score one observed transaction, emit its report line and append the
    /// verdict to the log. Returns the verdict.
    ///
    /// The golden prediction is recomputed here rather than trusted from the
    /// generator, so a generator/model divergence shows up as a failure
    /// instead of hiding.
    pub fn score(&mut self, txn: Transaction, observed: Observation) -> bool {
        let expected = self.alu.evaluate(txn.a, txn.b, txn.ctrl);

        let mut pass = observed.result.matches(expected.result, self.alu.mask())
            && observed.zero.matches(expected.zero as u64, 1);
        // Only the multi-field variant reports an overflow flag.
        if matches!(txn.ctrl, ControlFields::Mips { .. }) {
            pass = pass && observed.overflow.matches(expected.overflow as u64, 1);
        }

        let record = VerdictRecord {
            txn,
            expected,
            observed,
            pass,
        };
        self.report.record(&record.report_line());
        self.records.push(record);

        self.summary.total += 1;
        if pass {
            self.summary.passed += 1;
        } else {
            self.summary.failed += 1;
        }
        pass
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn records(&self) -> &[VerdictRecord] {
        &self.records
    }

    /// Close the report sink and hand back the run's results.
    pub fn into_outcome(mut self) -> RunOutcome {
        self.report.finish();
        RunOutcome {
            summary: self.summary,
            records: self.records,
        }
    }
}
