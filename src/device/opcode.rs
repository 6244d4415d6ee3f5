use std::fmt;

use bitvec::prelude::*;
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// The sixteen operations of the wrist device.
///
/// The last letter of a mnemonic says how `B` is read (`r`egister or
/// `i`mmediate); for the comparisons the two letters before it cover `A`
/// and `B`. The result always lands in register `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumString, IntoStaticStr, EnumIter, EnumCount, FromRepr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Opcode {
    Addr, Addi, Mulr, Muli,
    Banr, Bani, Borr, Bori,
    Setr, Seti,
    Gtir, Gtri, Gtrr,
    Eqir, Eqri, Eqrr,
}

/// How an instruction reads one of its two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {Register, Immediate, Ignored}

impl Opcode {
    pub fn operands(self) -> (Operand, Operand) {
        use Opcode::*;
        use Operand::*;
        match self {
            Addr | Mulr | Banr | Borr | Gtrr | Eqrr => (Register, Register),
            Addi | Muli | Bani | Bori | Gtri | Eqri => (Register, Immediate),
            Gtir | Eqir => (Immediate, Register),
            Setr => (Register, Ignored),
            Seti => (Immediate, Ignored),
        }
    }

    pub fn index(self) -> usize {self as usize}
}

const _: () = assert!(Opcode::COUNT == 16);

type Bits = BitArr!(for 16, in u16, Lsb0);

/// A subset of [`Opcode`]s, one bit per operation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSet(Bits);

impl OpcodeSet {
    pub fn empty() -> Self {OpcodeSet(BitArray::ZERO)}

    pub fn all() -> Self {
        let mut bits: Bits = BitArray::ZERO;
        bits.fill(true);
        OpcodeSet(bits)
    }

    pub fn insert(&mut self, op: Opcode) {self.0.set(op.index(), true)}
    pub fn remove(&mut self, op: Opcode) {self.0.set(op.index(), false)}
    pub fn contains(&self, op: Opcode) -> bool {self.0[op.index()]}
    pub fn len(&self) -> usize {self.0.count_ones()}
    pub fn is_empty(&self) -> bool {self.0.not_any()}

    pub fn intersect(&mut self, other: &OpcodeSet) {
        for ix in 0 .. Opcode::COUNT {
            let keep = self.0[ix] && other.0[ix];
            self.0.set(ix, keep);
        }
    }

    /// The only member, if there is exactly one.
    pub fn single(&self) -> Option<Opcode> {
        if self.len() == 1 {self.iter().next()} else {None}
    }

    pub fn iter(&self) -> impl Iterator<Item = Opcode> + '_ {
        self.0.iter_ones().filter_map(|ix| Opcode::from_repr(ix as u8))
    }
}

impl Default for OpcodeSet {
    fn default() -> Self {OpcodeSet::empty()}
}

impl FromIterator<Opcode> for OpcodeSet {
    fn from_iter<I: IntoIterator<Item = Opcode>>(iter: I) -> Self {
        let mut set = OpcodeSet::empty();
        for op in iter {set.insert(op)}
        set
    }
}

impl fmt::Display for OpcodeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (ix, op) in self.iter().enumerate() {
            if ix > 0 {f.write_str(", ")?}
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl fmt::Debug for OpcodeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
