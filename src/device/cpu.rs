use std::str::FromStr;

use log::trace;

use super::{DeviceError, Instruction, Registers};
use crate::{Error, Result};

/// A listing of decoded instructions, optionally with a register bound to
/// the instruction pointer by an `#ip N` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub ip_register: Option<usize>,
    pub instructions: Vec<Instruction>,
}

/// Everything that changes while a program runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MachineState {
    pub registers: Registers,
    pub ip: i64,
}

impl MachineState {
    pub fn new(registers: Registers) -> Self {MachineState {registers, ip: 0}}
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, ip_register: Option<usize>) -> Self {
        Program {ip_register, instructions}
    }

    pub fn len(&self) -> usize {self.instructions.len()}
    pub fn is_empty(&self) -> bool {self.instructions.is_empty()}

    /// The instruction `ip` points at, or `None` if it points outside the program.
    pub fn fetch(&self, ip: i64) -> Option<&Instruction> {
        usize::try_from(ip).ok().and_then(|ix| self.instructions.get(ix))
    }

    /// One fetch/execute/advance cycle; `Ok(None)` means the program halted.
    ///
    /// With a bound register the pointer is written into that register
    /// before the instruction runs and read back from it afterwards, so an
    /// instruction that writes the register is a jump. Without one the
    /// pointer just counts up.
    pub fn step(&self, state: &MachineState) -> Result<Option<MachineState>, DeviceError> {
        let Some(ins) = self.fetch(state.ip) else {return Ok(None)};
        let mut next = state.clone();
        if let Some(reg) = self.ip_register {
            next.registers.set(reg as i64, state.ip)?;
        }
        ins.execute(&mut next.registers)?;
        let ip = match self.ip_register {
            Some(reg) => next.registers.get(reg as i64)?,
            None => state.ip,
        };
        next.ip = ip.wrapping_add(1);
        Ok(Some(next))
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut ip_register = None;
        let mut instructions = vec![];
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(reg) = line.strip_prefix("#ip") {
                if ip_register.is_some() || !instructions.is_empty() {
                    return Err(Error::parse("#ip directive ahead of the program", line));
                }
                ip_register = Some(reg.trim().parse()?);
            } else {
                instructions.push(line.parse()?);
            }
        }
        Ok(Program {ip_register, instructions})
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {Running, Halted, Errored(DeviceError)}

/// Runs a [`Program`] against a register file it owns.
pub struct Cpu<'p> {
    program: &'p Program,
    state: MachineState,
    run_state: RunState,
    steps: u64,
}

impl<'p> Cpu<'p> {
    pub fn new(program: &'p Program, registers: Registers) -> Result<Self, DeviceError> {
        if let Some(reg) = program.ip_register {registers.get(reg as i64)?;}
        Ok(Cpu {program, state: MachineState::new(registers), run_state: RunState::Running, steps: 0})
    }

    pub fn ip(&self) -> i64 {self.state.ip}
    pub fn registers(&self) -> &Registers {&self.state.registers}
    pub fn state(&self) -> &MachineState {&self.state}
    pub fn run_state(&self) -> &RunState {&self.run_state}
    pub fn steps(&self) -> u64 {self.steps}
    pub fn current_instruction(&self) -> Option<&Instruction> {self.program.fetch(self.state.ip)}

    pub fn step(&mut self) -> Result<&RunState, DeviceError> {
        match &self.run_state {
            RunState::Running => (),
            RunState::Halted => return Ok(&self.run_state),
            RunState::Errored(e) => return Err(e.clone()),
        }
        match self.program.step(&self.state) {
            Ok(Some(next)) => {
                if let Some(ins) = self.current_instruction() {
                    trace!("ip={:<3} {} {:<16} {}", self.state.ip, self.state.registers, ins, next.registers);
                }
                self.state = next;
                self.steps += 1;
            }
            Ok(None) => self.run_state = RunState::Halted,
            Err(e) => {
                self.run_state = RunState::Errored(e.clone());
                return Err(e);
            }
        }
        Ok(&self.run_state)
    }

    /// Runs to completion and returns the final registers.
    pub fn run(&mut self) -> Result<&Registers, DeviceError> {
        while *self.step()? == RunState::Running {}
        Ok(self.registers())
    }

    /// Runs until `pause` holds for the instruction about to execute.
    ///
    /// Returns `true` when paused and `false` once the program has halted.
    /// Calling it again straight away pauses again without stepping.
    pub fn run_until(&mut self, mut pause: impl FnMut(&Cpu) -> bool) -> Result<bool, DeviceError> {
        loop {
            if self.current_instruction().is_none() {
                self.step()?;
                return Ok(false);
            }
            if pause(self) {return Ok(true)}
            self.step()?;
        }
    }
}
