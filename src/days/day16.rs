use log::info;

use crate::device::{ambiguous_count, parse_manual, resolve_mapping, Cpu, Program, Registers};
use crate::Result;

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (experiments, code) = parse_manual(input)?;
    if part == 1 {return Ok(ambiguous_count(&experiments).to_string())}

    let map = resolve_mapping(&experiments)?;
    info!("opcode numbering:\n{}", map);
    let program = Program::new(map.decode_all(&code)?, None);
    let mut cpu = Cpu::new(&program, Registers::new(4))?;
    Ok(cpu.run()?.get(0)?.to_string())
}
