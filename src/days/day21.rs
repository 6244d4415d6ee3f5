use log::debug;
use rustc_hash::FxHashSet;

use crate::device::{Cpu, Instruction, Opcode, Program, Registers};
use crate::{Error, Result};

/// The `eqrr` that compares register 0, and the register it compares it with.
fn halting_check(program: &Program) -> Option<(i64, i64)> {
    program.instructions.iter().enumerate().find_map(|(ix, ins)| match *ins {
        Instruction {opcode: Opcode::Eqrr, a: 0, b, ..} => Some((ix as i64, b)),
        Instruction {opcode: Opcode::Eqrr, a, b: 0, ..} => Some((ix as i64, a)),
        _ => None,
    })
}

/// Values the program compares register 0 against, in order, up to the
/// first one it repeats. Register 0 itself never matches so the program
/// keeps going.
pub fn halting_values(program: &Program, first_only: bool) -> Result<Vec<i64>> {
    let (at, reg) = halting_check(program)
        .ok_or_else(|| Error::Unsolvable("no eqrr reads register 0".into()))?;
    let mut regs = Registers::new(6);
    regs.set(0, -1)?;
    let mut cpu = Cpu::new(program, regs)?;
    let mut seen = FxHashSet::default();
    let mut values = vec![];
    while cpu.run_until(|cpu| cpu.ip() == at)? {
        let value = cpu.registers().get(reg)?;
        if !seen.insert(value) {break}
        debug!("candidate {} after {} steps", value, cpu.steps());
        values.push(value);
        if first_only {break}
        cpu.step()?;
    }
    Ok(values)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let program: Program = input.parse()?;
    let values = halting_values(&program, part == 1)?;
    let answer = if part == 1 {values.first()} else {values.last()};
    answer.map(|v| v.to_string()).ok_or_else(|| Error::Unsolvable("the check is never reached".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // r1 walks 3, 6, 1, 4, 7, 2, 5, 0 (mod 8) and then repeats.
    const LOOP: &str = "\
#ip 5
addi 1 3 1
bani 1 7 1
eqrr 1 0 2
addr 2 5 5
seti -1 0 5
";

    #[test]
    fn fewest_instructions() {
        assert_eq!(solve(1, LOOP).unwrap(), "3");
    }

    #[test]
    fn most_instructions() {
        assert_eq!(solve(2, LOOP).unwrap(), "0");
        let program: Program = LOOP.parse().unwrap();
        assert_eq!(halting_values(&program, false).unwrap(), vec![3, 6, 1, 4, 7, 2, 5, 0]);
    }

    #[test]
    fn needs_a_register_zero_check() {
        assert!(matches!(solve(1, "#ip 5\nseti 1 0 0\n"), Err(Error::Unsolvable(_))));
    }
}
