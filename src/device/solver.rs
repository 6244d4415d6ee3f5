use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use regex::Regex;
use rustc_hash::FxHashMap;
use strum::IntoEnumIterator;

use super::{DeviceError, Instruction, MappingError, Opcode, OpcodeSet, RawInstruction, Registers};
use crate::{Error, Result};

/// One sample from the manual: registers before and after a single
/// instruction whose opcode is only known by its slot number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experiment {
    pub before: Registers,
    pub instruction: RawInstruction,
    pub after: Registers,
}

impl Experiment {
    /// Every operation that turns `before` into `after` with these operands.
    /// Operations that fault on the operands are not candidates.
    pub fn possible_opcodes(&self) -> OpcodeSet {
        Opcode::iter().filter(|&op| {
            match self.instruction.with_opcode(op).apply(&self.before) {
                Ok(regs) => regs == self.after,
                Err(_) => false,
            }
        }).collect()
    }
}

/// Number of samples that behave like three or more operations.
pub fn ambiguous_count(experiments: &[Experiment]) -> usize {
    experiments.iter().filter(|e| e.possible_opcodes().len() >= 3).count()
}

/// Slot number to operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeMap(BTreeMap<usize, Opcode>);

impl OpcodeMap {
    pub fn get(&self, slot: usize) -> Option<Opcode> {self.0.get(&slot).copied()}
    pub fn len(&self) -> usize {self.0.len()}
    pub fn is_empty(&self) -> bool {self.0.is_empty()}
    pub fn iter(&self) -> impl Iterator<Item = (usize, Opcode)> + '_ {
        self.0.iter().map(|(&slot, &op)| (slot, op))
    }

    pub fn decode_all(&self, code: &[RawInstruction]) -> Result<Vec<Instruction>, DeviceError> {
        code.iter().map(|raw| raw.decode(self)).collect()
    }
}

impl FromIterator<(usize, Opcode)> for OpcodeMap {
    fn from_iter<I: IntoIterator<Item = (usize, Opcode)>>(iter: I) -> Self {
        OpcodeMap(iter.into_iter().collect())
    }
}

impl fmt::Display for OpcodeMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (slot, op) in self.iter() {writeln!(f, "{:>2} -> {}", slot, op)?}
        Ok(())
    }
}

/// Works out which operation hides behind each slot number.
///
/// Each slot starts from the operations every one of its samples allows.
/// A slot down to one candidate is fixed and that operation is struck from
/// all the others; a round that fixes nothing ends in an error.
pub fn resolve_mapping(experiments: &[Experiment]) -> Result<OpcodeMap, MappingError> {
    let mut candidates: FxHashMap<usize, OpcodeSet> = FxHashMap::default();
    for e in experiments {
        candidates.entry(e.instruction.slot)
            .or_insert_with(OpcodeSet::all)
            .intersect(&e.possible_opcodes());
    }
    for (slot, set) in candidates.iter().collect::<BTreeMap<_, _>>() {
        debug!("slot {:>2} could be {}", slot, set);
    }

    let mut resolved = BTreeMap::new();
    while !candidates.is_empty() {
        if let Some(slot) = candidates.iter().filter(|(_, set)| set.is_empty()).map(|(&slot, _)| slot).min() {
            return Err(MappingError::Contradiction {slot});
        }
        let next = candidates.iter()
            .filter_map(|(&slot, set)| set.single().map(|op| (slot, op)))
            .min();
        let Some((slot, op)) = next else {
            let mut unresolved = candidates.into_keys().collect::<Vec<_>>();
            unresolved.sort_unstable();
            return Err(MappingError::Ambiguous {unresolved});
        };
        debug!("slot {:>2} is {}", slot, op);
        candidates.remove(&slot);
        for set in candidates.values_mut() {set.remove(op)}
        resolved.insert(slot, op);
    }
    Ok(OpcodeMap(resolved))
}

fn parse_registers(text: &str) -> Result<Registers> {
    let values = text.split(',')
        .map(|v| v.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != 4 {return Err(Error::parse("four registers", text))}
    Ok(Registers::from_values(&values))
}

/// Splits the manual into its samples and the numeric program after them.
pub fn parse_manual(text: &str) -> Result<(Vec<Experiment>, Vec<RawInstruction>)> {
    let sample = Regex::new(
        r"Before:\s*\[([-\d, ]+)\]\s*\n\s*(\d+ +-?\d+ +-?\d+ +-?\d+)\s*\n\s*After:\s*\[([-\d, ]+)\]"
    )?;
    let mut experiments = vec![];
    let mut program_at = 0;
    for caps in sample.captures_iter(text) {
        experiments.push(Experiment {
            before: parse_registers(&caps[1])?,
            instruction: caps[2].parse()?,
            after: parse_registers(&caps[3])?,
        });
        program_at = caps.get(0).map_or(program_at, |m| m.end());
    }
    let program = text[program_at ..].lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<RawInstruction>>>()?;
    Ok((experiments, program))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Before: [3, 2, 1, 1]
9 2 1 2
After:  [3, 2, 2, 1]";

    fn scrambled(slot: usize) -> Opcode {
        Opcode::from_repr(((slot * 7 + 3) % 16) as u8).unwrap()
    }

    struct Lcg(u64);
    impl Lcg {
        fn below(&mut self, n: u64) -> i64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) % n) as i64
        }
    }

    fn full_manual() -> Vec<Experiment> {
        let mut rng = Lcg(2018);
        let mut samples = vec![];
        for _ in 0 .. 60 {
            for slot in 0 .. 16 {
                let before = Registers::from_values(&[rng.below(4), rng.below(4), rng.below(4), rng.below(4)]);
                let instruction = RawInstruction {slot, a: rng.below(4), b: rng.below(4), c: rng.below(4)};
                let after = instruction.with_opcode(scrambled(slot)).apply(&before).unwrap();
                samples.push(Experiment {before, instruction, after});
            }
        }
        samples
    }

    #[test]
    fn sample_behaves_like_three_opcodes() {
        let (experiments, program) = parse_manual(SAMPLE).unwrap();
        assert!(program.is_empty());
        assert_eq!(experiments.len(), 1);
        let candidates = experiments[0].possible_opcodes();
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec![Opcode::Addi, Opcode::Mulr, Opcode::Seti]);
        assert_eq!(ambiguous_count(&experiments), 1);
        assert_eq!(resolve_mapping(&experiments), Err(MappingError::Ambiguous {unresolved: vec![9]}));
    }

    #[test]
    fn faulting_candidates_are_skipped() {
        let e = Experiment {
            before: Registers::from_values(&[1, 2, 3, 4]),
            instruction: "5 99 1 2".parse().unwrap(),
            after: Registers::from_values(&[1, 2, 1, 4]),
        };
        assert_eq!(e.possible_opcodes().iter().collect::<Vec<_>>(), vec![Opcode::Gtir]);
    }

    #[test]
    fn conflicting_samples_are_a_contradiction() {
        let (mut experiments, _) = parse_manual(SAMPLE).unwrap();
        experiments.push(Experiment {
            before: Registers::new(4),
            instruction: "9 0 0 0".parse().unwrap(),
            after: Registers::from_values(&[5, 0, 0, 0]),
        });
        assert_eq!(resolve_mapping(&experiments), Err(MappingError::Contradiction {slot: 9}));
    }

    #[test]
    fn full_manual_resolves_to_a_bijection() {
        let experiments = full_manual();
        let map = resolve_mapping(&experiments).unwrap();
        assert_eq!(map.len(), 16);
        for (slot, op) in map.iter() {assert_eq!(op, scrambled(slot));}
        let ops: OpcodeSet = map.iter().map(|(_, op)| op).collect();
        assert_eq!(ops, OpcodeSet::all());
        assert_eq!(resolve_mapping(&experiments).unwrap(), map);
    }

    #[test]
    fn manual_with_program() {
        let mut text = String::new();
        for e in full_manual().iter().take(40) {
            text += &format!("Before: {}\n{}\nAfter:  {}\n\n", e.before, e.instruction, e.after);
        }
        text += "\n\n1 2 3 0\n4 0 0 1\n";
        let (experiments, program) = parse_manual(&text).unwrap();
        assert_eq!(experiments, full_manual()[.. 40]);
        assert_eq!(program.len(), 2);
        assert_eq!(program[1], RawInstruction {slot: 4, a: 0, b: 0, c: 1});

        let map: OpcodeMap = [(1, Opcode::Seti)].into_iter().collect();
        assert_eq!(map.decode_all(&program), Err(DeviceError::UnknownOpcode("4".into())));
        assert_eq!(map.to_string(), " 1 -> seti\n");
    }
}
