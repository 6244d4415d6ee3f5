use std::fmt;
use std::str::FromStr;

use super::{DeviceError, Opcode, OpcodeMap, Registers};
use crate::{Error, Result};

/// A decoded instruction: an operation and its three operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: Opcode,
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl Instruction {
    pub fn new(opcode: Opcode, a: i64, b: i64, c: i64) -> Self {
        Instruction {opcode, a, b, c}
    }

    /// Runs this instruction against `regs`, writing register `c` only.
    ///
    /// On error the register file is left untouched.
    pub fn execute(&self, regs: &mut Registers) -> Result<(), DeviceError> {
        use Opcode::*;
        let &Instruction {opcode, a, b, c} = self;
        let value = match opcode {
            Addr => regs.get(a)?.wrapping_add(regs.get(b)?),
            Addi => regs.get(a)?.wrapping_add(b),
            Mulr => regs.get(a)?.wrapping_mul(regs.get(b)?),
            Muli => regs.get(a)?.wrapping_mul(b),
            Banr => regs.get(a)? & regs.get(b)?,
            Bani => regs.get(a)? & b,
            Borr => regs.get(a)? | regs.get(b)?,
            Bori => regs.get(a)? | b,
            Setr => regs.get(a)?,
            Seti => a,
            Gtir => (a > regs.get(b)?) as i64,
            Gtri => (regs.get(a)? > b) as i64,
            Gtrr => (regs.get(a)? > regs.get(b)?) as i64,
            Eqir => (a == regs.get(b)?) as i64,
            Eqri => (regs.get(a)? == b) as i64,
            Eqrr => (regs.get(a)? == regs.get(b)?) as i64,
        };
        regs.set(c, value)
    }

    /// The register file after executing this instruction on a copy of `regs`.
    pub fn apply(&self, regs: &Registers) -> Result<Registers, DeviceError> {
        let mut out = regs.clone();
        self.execute(&mut out)?;
        Ok(out)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} {}", self.opcode, self.a, self.b, self.c)
    }
}

fn four_words(s: &str) -> Result<[&str; 4]> {
    let words = s.split_whitespace().collect::<Vec<_>>();
    <[&str; 4]>::try_from(words).map_err(|_| Error::parse("instruction", s))
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [op, a, b, c] = four_words(s)?;
        let opcode = op.parse().map_err(|_| DeviceError::UnknownOpcode(op.to_string()))?;
        Ok(Instruction {opcode, a: a.parse()?, b: b.parse()?, c: c.parse()?})
    }
}

/// An instruction whose operation is still a scrambled numeric slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawInstruction {
    pub slot: usize,
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl RawInstruction {
    pub fn with_opcode(&self, opcode: Opcode) -> Instruction {
        Instruction {opcode, a: self.a, b: self.b, c: self.c}
    }

    pub fn decode(&self, map: &OpcodeMap) -> Result<Instruction, DeviceError> {
        map.get(self.slot)
            .map(|op| self.with_opcode(op))
            .ok_or_else(|| DeviceError::UnknownOpcode(self.slot.to_string()))
    }
}

impl FromStr for RawInstruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [slot, a, b, c] = four_words(s)?;
        Ok(RawInstruction {slot: slot.parse()?, a: a.parse()?, b: b.parse()?, c: c.parse()?})
    }
}

impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} {}", self.slot, self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn run(text: &str, regs: &[i64]) -> Vec<i64> {
        let ins: Instruction = text.parse().unwrap();
        ins.apply(&Registers::from_values(regs)).unwrap().values().to_vec()
    }

    #[test]
    fn arithmetic_and_bitwise_laws() {
        let regs = [6, 3, 12, 0];
        assert_eq!(run("addr 0 1 3", &regs), [6, 3, 12, 9]);
        assert_eq!(run("addi 0 7 3", &regs), [6, 3, 12, 13]);
        assert_eq!(run("mulr 0 1 3", &regs), [6, 3, 12, 18]);
        assert_eq!(run("muli 2 -2 3", &regs), [6, 3, 12, -24]);
        assert_eq!(run("banr 0 2 3", &regs), [6, 3, 12, 4]);
        assert_eq!(run("bani 2 5 3", &regs), [6, 3, 12, 4]);
        assert_eq!(run("borr 0 1 3", &regs), [6, 3, 12, 7]);
        assert_eq!(run("bori 1 8 3", &regs), [6, 3, 12, 11]);
        assert_eq!(run("setr 2 99 0", &regs), [12, 3, 12, 0]);
        assert_eq!(run("seti 99 99 0", &regs), [99, 3, 12, 0]);
    }

    #[test]
    fn comparisons_write_one_or_zero() {
        let regs = [6, 3, 12, 0];
        assert_eq!(run("gtir 7 0 3", &regs), [6, 3, 12, 1]);
        assert_eq!(run("gtri 0 6 3", &regs), [6, 3, 12, 0]);
        assert_eq!(run("gtrr 2 0 3", &regs), [6, 3, 12, 1]);
        assert_eq!(run("eqir 3 1 3", &regs), [6, 3, 12, 1]);
        assert_eq!(run("eqri 1 4 3", &regs), [6, 3, 12, 0]);
        assert_eq!(run("eqrr 0 0 3", &regs), [6, 3, 12, 1]);
    }

    #[test]
    fn bad_register_operands_fail_without_writing() {
        let mut regs = Registers::from_values(&[1, 2, 3, 4]);
        let err = Instruction::new(Opcode::Addr, 99, 0, 0).execute(&mut regs);
        assert_eq!(err, Err(DeviceError::InvalidOperand {index: 99, count: 4}));
        let err = Instruction::new(Opcode::Seti, 5, 0, 4).execute(&mut regs);
        assert_eq!(err, Err(DeviceError::InvalidOperand {index: 4, count: 4}));
        assert_eq!(regs.values(), &[1, 2, 3, 4]);

        // Immediates are never looked up.
        assert!(Instruction::new(Opcode::Addi, 0, 99, 1).execute(&mut regs).is_ok());
    }

    #[test]
    fn parses_and_displays() {
        let ins: Instruction = "seti  5 0 1".parse().unwrap();
        assert_eq!(ins, Instruction::new(Opcode::Seti, 5, 0, 1));
        assert_eq!(ins.to_string(), "seti 5 0 1");
        assert!(matches!("frob 1 2 3".parse::<Instruction>(), Err(Error::Device(DeviceError::UnknownOpcode(_)))));
        assert!(matches!("addr 1 2".parse::<Instruction>(), Err(Error::Parse {..})));

        let raw: RawInstruction = "9 2 1 2".parse().unwrap();
        assert_eq!(raw.with_opcode(Opcode::Mulr), Instruction::new(Opcode::Mulr, 2, 1, 2));
        assert_eq!(raw.decode(&OpcodeMap::default()), Err(DeviceError::UnknownOpcode("9".into())));
    }

    proptest! {
        #[test]
        fn writes_exactly_one_register(
            op in 0u8 .. 16,
            a in 0i64 .. 4, b in 0i64 .. 4, c in 0i64 .. 4,
            regs in proptest::array::uniform4(-1000i64 .. 1000),
        ) {
            let opcode = Opcode::from_repr(op).unwrap();
            let before = Registers::from_values(&regs);
            let after = Instruction::new(opcode, a, b, c).apply(&before).unwrap();
            for ix in 0 .. 4 {
                if ix != c as usize {prop_assert_eq!(after.values()[ix], before.values()[ix]);}
            }
        }

        #[test]
        fn comparisons_yield_booleans(
            a in -3i64 .. 4, b in -3i64 .. 4, c in 0i64 .. 4,
            regs in proptest::array::uniform4(-5i64 .. 5),
        ) {
            let before = Registers::from_values(&regs);
            for opcode in Opcode::iter().filter(|op| op.to_string().starts_with("gt") || op.to_string().starts_with("eq")) {
                if let Ok(after) = Instruction::new(opcode, a, b, c).apply(&before) {
                    prop_assert!(matches!(after.get(c), Ok(0 | 1)));
                }
            }
        }
    }
}
