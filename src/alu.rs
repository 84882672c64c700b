//! Width-parameterized ALU operation model.
//!
//! Two control-field encodings select from one shared set of operations:
//! a 3-bit flat opcode (the small 8-bit ALU) and a MIPS-style multi-field
//! selector (the 32-bit ALU). Both decode into a single canonical operation
//! enum so their semantics cannot drift apart. Evaluation is a pure, total
//! function: every well-formed input produces a result, and unrecognized
//! control fields produce the defined default (zero result, zero flag set).

use std::fmt;

use thiserror::Error;

/// Configuration rejected at construction time. Evaluation itself never fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Shift-amount masking needs a power-of-two width; 8 through 64 covers
    /// both ALU variants.
    #[error("unsupported operand width {0}, expected 8, 16, 32 or 64")]
    UnsupportedWidth(u32),
}

/// Which control-field encoding the ALU variant under test uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// 3-bit flat opcode.
    Simple,
    /// Multi-field class/shift-function/logic-function selector.
    Mips,
}

/// Operation selector fields, as presented on the ALU's control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFields {
    /// Flat opcode: 0 ADD, 1 SUB, 2 AND, 3 OR, 4 XOR, 5 NOT, 6 SHL, 7 SHR.
    /// Anything above 7 is unrecognized.
    Simple { opcode: u8 },
    /// Multi-field selector. `class` picks the unit: 0 shift (`shift_fn`:
    /// 0 SLL, 1 SRL, 2 SRA), 1 logic (`logic_fn`: 0 AND, 1 OR, 2 XOR,
    /// 3 NOR), 2 ADD, 3 SUB, 4 SLT. Shifts move operand B by the constant
    /// `shamt` field, or by the low bits of operand A when `shamt_from_a`
    /// is set. Out-of-range fields are unrecognized.
    Mips {
        class: u8,
        shift_fn: u8,
        logic_fn: u8,
        shamt: u8,
        shamt_from_a: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftKind {
    LeftLogical,
    RightLogical,
    RightArith,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Amount {
    Const(u8),
    OperandA,
    OperandB,
}

/// Canonical operation, after control-field decode. Shifts carry their fully
/// resolved datum and amount source so the evaluator has a single arm for
/// both encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Nor,
    Not,
    Slt,
    Shift {
        kind: ShiftKind,
        datum: Operand,
        amount: Amount,
    },
}

impl ControlFields {
    /// Decode to the canonical operation; `None` means unrecognized fields
    /// and maps to the default output.
    fn decode(self) -> Option<Op> {
        match self {
            Self::Simple { opcode } => match opcode {
                0 => Some(Op::Add),
                1 => Some(Op::Sub),
                2 => Some(Op::And),
                3 => Some(Op::Or),
                4 => Some(Op::Xor),
                5 => Some(Op::Not),
                // The flat encoding has no shamt field: shift A by B.
                6 => Some(Op::Shift {
                    kind: ShiftKind::LeftLogical,
                    datum: Operand::A,
                    amount: Amount::OperandB,
                }),
                7 => Some(Op::Shift {
                    kind: ShiftKind::RightLogical,
                    datum: Operand::A,
                    amount: Amount::OperandB,
                }),
                _ => None,
            },
            Self::Mips {
                class,
                shift_fn,
                logic_fn,
                shamt,
                shamt_from_a,
            } => match class {
                0 => {
                    let kind = match shift_fn {
                        0 => ShiftKind::LeftLogical,
                        1 => ShiftKind::RightLogical,
                        2 => ShiftKind::RightArith,
                        _ => return None,
                    };
                    let amount = if shamt_from_a {
                        Amount::OperandA
                    } else {
                        Amount::Const(shamt)
                    };
                    Some(Op::Shift {
                        kind,
                        datum: Operand::B,
                        amount,
                    })
                }
                1 => match logic_fn {
                    0 => Some(Op::And),
                    1 => Some(Op::Or),
                    2 => Some(Op::Xor),
                    3 => Some(Op::Nor),
                    _ => None,
                },
                2 => Some(Op::Add),
                3 => Some(Op::Sub),
                4 => Some(Op::Slt),
                _ => None,
            },
        }
    }

    /// Mnemonic for report lines and diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self.decode() {
            Some(Op::Add) => "add",
            Some(Op::Sub) => "sub",
            Some(Op::And) => "and",
            Some(Op::Or) => "or",
            Some(Op::Xor) => "xor",
            Some(Op::Nor) => "nor",
            Some(Op::Not) => "not",
            Some(Op::Slt) => "slt",
            Some(Op::Shift { kind, .. }) => match kind {
                ShiftKind::LeftLogical => "sll",
                ShiftKind::RightLogical => "srl",
                ShiftKind::RightArith => "sra",
            },
            None => "invalid",
        }
    }
}

impl fmt::Display for ControlFields {
    /// Report-line `opcode=` field: numeric for the flat encoding, mnemonic
    /// for the multi-field one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { opcode } => write!(f, "{opcode}"),
            Self::Mips { .. } => f.write_str(self.mnemonic()),
        }
    }
}

/// Model output: the masked result plus the two derived flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput {
    pub result: u64,
    /// True iff every result bit is clear (full-width OR-reduce, inverted).
    pub zero: bool,
    /// Two's-complement signed overflow; only ADD and SUB can assert it.
    pub overflow: bool,
}

/// Stateless golden model of the ALU. Safe to share and call from any task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alu {
    width: u32,
    mask: u64,
}

impl Alu {
    pub fn new(width: u32) -> Result<Self, ConfigError> {
        if !matches!(width, 8 | 16 | 32 | 64) {
            return Err(ConfigError::UnsupportedWidth(width));
        }
        let mask = if width == 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        Ok(Self { width, mask })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Evaluate one operation. All arithmetic is modulo 2^width: operands are
    /// masked on entry and the result on exit, with no implicit promotion.
    /// NOT ignores operand B entirely (it is a don't-care input).
    pub fn evaluate(&self, a: u64, b: u64, ctrl: ControlFields) -> AluOutput {
        let a = a & self.mask;
        let b = b & self.mask;
        let sign = 1u64 << (self.width - 1);

        let (result, overflow) = match ctrl.decode() {
            None => (0, false),
            Some(Op::Add) => {
                let r = a.wrapping_add(b) & self.mask;
                // Same operand signs, result sign differs.
                let ovf = (a ^ b) & sign == 0 && (a ^ r) & sign != 0;
                (r, ovf)
            }
            Some(Op::Sub) => {
                // Addition of the two's-complement negation of the subtrahend.
                let neg_b = (!b).wrapping_add(1) & self.mask;
                let r = a.wrapping_add(neg_b) & self.mask;
                // Operand signs differ, result sign differs from the minuend's.
                let ovf = (a ^ b) & sign != 0 && (a ^ r) & sign != 0;
                (r, ovf)
            }
            Some(Op::And) => (a & b, false),
            Some(Op::Or) => (a | b, false),
            Some(Op::Xor) => (a ^ b, false),
            Some(Op::Nor) => (!(a | b) & self.mask, false),
            Some(Op::Not) => (!a & self.mask, false),
            Some(Op::Slt) => ((self.to_signed(a) < self.to_signed(b)) as u64, false),
            Some(Op::Shift { kind, datum, amount }) => {
                let d = match datum {
                    Operand::A => a,
                    Operand::B => b,
                };
                let raw = match amount {
                    Amount::Const(c) => c as u64,
                    Amount::OperandA => a,
                    Amount::OperandB => b,
                };
                // Masked to log2(width) bits: amounts >= width wrap, they
                // are not clamped.
                let amt = (raw & (self.width as u64 - 1)) as u32;
                let r = match kind {
                    ShiftKind::LeftLogical => (d << amt) & self.mask,
                    ShiftKind::RightLogical => d >> amt,
                    ShiftKind::RightArith => (self.to_signed(d) >> amt) as u64 & self.mask,
                };
                (r, false)
            }
        };

        AluOutput {
            result,
            zero: result == 0,
            overflow,
        }
    }

    /// Reinterpret a masked value as signed at the configured width.
    fn to_signed(&self, v: u64) -> i64 {
        let sign = 1u64 << (self.width - 1);
        if v & sign != 0 {
            (v | !self.mask) as i64
        } else {
            v as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(opcode: u8) -> ControlFields {
        ControlFields::Simple { opcode }
    }

    #[test]
    fn test_simple_opcode_table() {
        let alu = Alu::new(8).unwrap();
        let a = 0xCC;
        let b = 0x0F;
        assert_eq!(alu.evaluate(a, b, simple(0)).result, 0xDB); // add
        assert_eq!(alu.evaluate(a, b, simple(1)).result, 0xBD); // sub
        assert_eq!(alu.evaluate(a, b, simple(2)).result, 0x0C); // and
        assert_eq!(alu.evaluate(a, b, simple(3)).result, 0xCF); // or
        assert_eq!(alu.evaluate(a, b, simple(4)).result, 0xC3); // xor
        assert_eq!(alu.evaluate(a, b, simple(5)).result, 0x33); // not a
        assert_eq!(alu.evaluate(a, 2, simple(6)).result, 0x30); // shl by b
        assert_eq!(alu.evaluate(a, 2, simple(7)).result, 0x33); // shr by b
    }

    #[test]
    fn test_unrecognized_fields_default_to_zero() {
        let alu = Alu::new(8).unwrap();
        for ctrl in [
            simple(8),
            simple(0xFF),
            ControlFields::Mips {
                class: 5,
                shift_fn: 0,
                logic_fn: 0,
                shamt: 0,
                shamt_from_a: false,
            },
            ControlFields::Mips {
                class: 0,
                shift_fn: 3,
                logic_fn: 0,
                shamt: 1,
                shamt_from_a: false,
            },
            ControlFields::Mips {
                class: 1,
                shift_fn: 0,
                logic_fn: 4,
                shamt: 0,
                shamt_from_a: false,
            },
        ] {
            let out = alu.evaluate(0xAB, 0xCD, ctrl);
            assert_eq!(out.result, 0);
            assert!(out.zero);
            assert!(!out.overflow);
        }
    }

    #[test]
    fn test_mips_logic_unit() {
        let alu = Alu::new(32).unwrap();
        let logic = |logic_fn| ControlFields::Mips {
            class: 1,
            shift_fn: 0,
            logic_fn,
            shamt: 0,
            shamt_from_a: false,
        };
        let a = 0xF0F0_1234;
        let b = 0x0FF0_4321;
        assert_eq!(alu.evaluate(a, b, logic(0)).result, a & b);
        assert_eq!(alu.evaluate(a, b, logic(1)).result, a | b);
        assert_eq!(alu.evaluate(a, b, logic(2)).result, a ^ b);
        assert_eq!(alu.evaluate(a, b, logic(3)).result, !(a | b) as u32 as u64);
    }

    #[test]
    fn test_mips_shift_amount_sources() {
        let alu = Alu::new(32).unwrap();
        // Constant shamt field shifts operand B.
        let by_field = ControlFields::Mips {
            class: 0,
            shift_fn: 0,
            logic_fn: 0,
            shamt: 4,
            shamt_from_a: false,
        };
        assert_eq!(alu.evaluate(0, 0x0000_00FF, by_field).result, 0x0000_0FF0);
        // shamt_from_a takes the low five bits of operand A instead.
        let by_reg = ControlFields::Mips {
            class: 0,
            shift_fn: 0,
            logic_fn: 0,
            shamt: 31,
            shamt_from_a: true,
        };
        assert_eq!(alu.evaluate(8, 0x0000_00FF, by_reg).result, 0x0000_FF00);
    }

    #[test]
    fn test_not_ignores_operand_b() {
        let alu = Alu::new(8).unwrap();
        let first = alu.evaluate(0x5A, 0x00, simple(5));
        let second = alu.evaluate(0x5A, 0xFF, simple(5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_unsupported_widths() {
        for width in [0, 1, 7, 12, 33, 65, 128] {
            assert_eq!(Alu::new(width), Err(ConfigError::UnsupportedWidth(width)));
        }
        for width in [8, 16, 32, 64] {
            assert!(Alu::new(width).is_ok());
        }
    }

    #[test]
    fn test_width64_masking() {
        let alu = Alu::new(64).unwrap();
        let out = alu.evaluate(u64::MAX, 1, simple(0));
        assert_eq!(out.result, 0);
        assert!(out.zero);
    }
}
