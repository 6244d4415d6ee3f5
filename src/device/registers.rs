use std::fmt;

use arrayvec::ArrayVec;

use super::DeviceError;

/// The largest register file any device variant has.
pub const MAX_REGISTERS: usize = 6;

/// A fixed-length register file of 4 or 6 cells.
///
/// When a program binds the instruction pointer to a register, the pointer
/// lives in one of these cells: there is no separate copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Registers {
    cells: ArrayVec<i64, MAX_REGISTERS>,
}

impl Registers {
    /// `len` zeroed cells.
    pub fn new(len: usize) -> Self {
        assert!(len <= MAX_REGISTERS, "a register file holds at most {} cells", MAX_REGISTERS);
        Registers {cells: (0 .. len).map(|_| 0).collect()}
    }

    pub fn from_values(values: &[i64]) -> Self {
        assert!(values.len() <= MAX_REGISTERS, "a register file holds at most {} cells", MAX_REGISTERS);
        Registers {cells: values.iter().copied().collect()}
    }

    pub fn len(&self) -> usize {self.cells.len()}
    pub fn is_empty(&self) -> bool {self.cells.is_empty()}
    pub fn values(&self) -> &[i64] {&self.cells}

    fn slot(&self, index: i64) -> Result<usize, DeviceError> {
        usize::try_from(index).ok()
            .filter(|&ix| ix < self.cells.len())
            .ok_or(DeviceError::InvalidOperand {index, count: self.cells.len()})
    }

    pub fn get(&self, index: i64) -> Result<i64, DeviceError> {
        Ok(self.cells[self.slot(index)?])
    }

    pub fn set(&mut self, index: i64, value: i64) -> Result<(), DeviceError> {
        let ix = self.slot(index)?;
        self.cells[ix] = value;
        Ok(())
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (ix, v) in self.cells.iter().enumerate() {
            if ix > 0 {write!(f, ", ")?}
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {fmt::Display::fmt(self, f)}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_an_invalid_operand() {
        let mut regs = Registers::new(4);
        assert_eq!(regs.get(3), Ok(0));
        assert_eq!(regs.get(4), Err(DeviceError::InvalidOperand {index: 4, count: 4}));
        assert_eq!(regs.set(-1, 7), Err(DeviceError::InvalidOperand {index: -1, count: 4}));
        assert_eq!(regs.set(99, 7), Err(DeviceError::InvalidOperand {index: 99, count: 4}));
        assert_eq!(regs, Registers::new(4));
    }

    #[test]
    fn renders_like_the_manual() {
        let regs = Registers::from_values(&[3, 2, -1, 1]);
        assert_eq!(regs.to_string(), "[3, 2, -1, 1]");
        assert_eq!(Registers::new(6).values(), &[0; 6]);
    }
}
