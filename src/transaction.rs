//! Data flowing through the verification pipeline: transactions, golden
//! predictions, observed outputs and the per-comparison verdict records.

use std::fmt;

use crate::alu::{AluOutput, ControlFields};

/// One unit of stimulus: operands plus operation selector. Immutable once a
/// prediction has been made against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub a: u64,
    pub b: u64,
    pub ctrl: ControlFields,
    pub width: u32,
}

/// Generator handoff: a transaction annotated with its golden prediction.
/// The scoreboard deliberately ignores the cached prediction and recomputes
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    pub txn: Transaction,
    pub prediction: AluOutput,
}

/// Four-state bit vector: a value with a companion unknown-bit mask. A set
/// `unknown` bit means the corresponding value bit is X; an X bit can never
/// satisfy an equality comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourState {
    pub value: u64,
    pub unknown: u64,
}

impl FourState {
    /// A fully-known value (no X bits).
    pub fn known(value: u64) -> Self {
        Self { value, unknown: 0 }
    }

    /// Exact comparison under the given width mask. Fails whenever any
    /// masked bit is unknown, regardless of its value bit.
    pub fn matches(&self, expected: u64, mask: u64) -> bool {
        self.unknown & mask == 0 && self.value & mask == expected & mask
    }
}

impl From<bool> for FourState {
    fn from(flag: bool) -> Self {
        Self::known(flag as u64)
    }
}

impl fmt::Display for FourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unknown == 0 {
            write!(f, "{}", self.value)
        } else {
            f.write_str("X")
        }
    }
}

/// What the device under test actually produced for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub result: FourState,
    pub zero: FourState,
    pub overflow: FourState,
}

impl Observation {
    /// Lift a fully-known model output into an observation; this is the
    /// shape a second software evaluation path reports.
    pub fn from_output(out: AluOutput) -> Self {
        Self {
            result: FourState::known(out.result),
            zero: out.zero.into(),
            overflow: out.overflow.into(),
        }
    }
}

/// One comparison outcome. Appended to the ordered verdict log, never
/// mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictRecord {
    pub txn: Transaction,
    pub expected: AluOutput,
    pub observed: Observation,
    pub pass: bool,
}

impl VerdictRecord {
    /// Stable report line, one per record:
    /// `PASS: a=… b=… opcode=… result=…` or
    /// `FAIL: a=… b=… opcode=… DUT=… Expected=…`.
    pub fn report_line(&self) -> String {
        if self.pass {
            format!(
                "PASS: a={} b={} opcode={} result={}",
                self.txn.a, self.txn.b, self.txn.ctrl, self.expected.result
            )
        } else {
            format!(
                "FAIL: a={} b={} opcode={} DUT={} Expected={}",
                self.txn.a, self.txn.b, self.txn.ctrl, self.observed.result, self.expected.result
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_state_matching() {
        assert!(FourState::known(8).matches(8, 0xFF));
        assert!(!FourState::known(7).matches(8, 0xFF));
        // An unknown bit fails even when the value bits agree.
        let x = FourState {
            value: 8,
            unknown: 0x01,
        };
        assert!(!x.matches(8, 0xFF));
        // Unknown bits outside the width mask are ignored.
        let high_x = FourState {
            value: 8,
            unknown: 0x100,
        };
        assert!(high_x.matches(8, 0xFF));
    }

    #[test]
    fn test_four_state_display() {
        assert_eq!(FourState::known(42).to_string(), "42");
        let x = FourState {
            value: 42,
            unknown: 2,
        };
        assert_eq!(x.to_string(), "X");
    }

    #[test]
    fn test_report_line_format() {
        let txn = Transaction {
            a: 5,
            b: 3,
            ctrl: ControlFields::Simple { opcode: 0 },
            width: 8,
        };
        let expected = AluOutput {
            result: 8,
            zero: false,
            overflow: false,
        };
        let pass = VerdictRecord {
            txn,
            expected,
            observed: Observation::from_output(expected),
            pass: true,
        };
        assert_eq!(pass.report_line(), "PASS: a=5 b=3 opcode=0 result=8");

        let mut observed = Observation::from_output(expected);
        observed.result = FourState::known(7);
        let fail = VerdictRecord {
            txn,
            expected,
            observed,
            pass: false,
        };
        assert_eq!(fail.report_line(), "FAIL: a=5 b=3 opcode=0 DUT=7 Expected=8");
    }
}
