use log::debug;

use crate::device::{Cpu, Program, Registers};
use crate::{Error, Result};

pub fn divisor_sum(n: i64) -> i64 {
    let mut sum = 0;
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            sum += d;
            if d * d != n {sum += n / d;}
        }
        d += 1;
    }
    sum
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let program: Program = input.parse()?;
    let mut regs = Registers::new(6);
    if part == 1 {
        let mut cpu = Cpu::new(&program, regs)?;
        return Ok(cpu.run()?.get(0)?.to_string());
    }

    // Register 0 set makes the setup code build a much larger target before
    // jumping back to the top of the divisor loop at instruction 1.
    regs.set(0, 1)?;
    let mut cpu = Cpu::new(&program, regs)?;
    if !cpu.run_until(|cpu| cpu.ip() == 1)? {
        return Err(Error::Unsolvable("the program never entered its main loop".into()));
    }
    let target = cpu.registers().values().iter().copied().max().unwrap_or(0);
    debug!("summing the divisors of {} after {} steps", target, cpu.steps());
    Ok(divisor_sum(target).to_string())
}
