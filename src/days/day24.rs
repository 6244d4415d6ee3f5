use std::cmp::Reverse;

use log::debug;
use regex::Regex;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Army {ImmuneSystem, Infection}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub army: Army,
    pub units: u64,
    pub hp: u64,
    pub damage: u64,
    pub kind: String,
    pub initiative: u64,
    pub weak: Vec<String>,
    pub immune: Vec<String>,
}

impl Group {
    fn effective_power(&self) -> u64 {self.units * self.damage}

    /// Damage `self` would deal to `target`: zero if immune, doubled if weak.
    fn damage_to(&self, target: &Group) -> u64 {
        if target.immune.contains(&self.kind) {0}
        else if target.weak.contains(&self.kind) {2 * self.effective_power()}
        else {self.effective_power()}
    }
}

pub fn parse_groups(input: &str) -> Result<Vec<Group>> {
    let re = Regex::new(
        r"^(\d+) units each with (\d+) hit points(?: \(([^)]*)\))? with an attack that does (\d+) (\w+) damage at initiative (\d+)$"
    )?;
    let mut army = None;
    let mut groups = vec![];
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match line {
            "Immune System:" => {army = Some(Army::ImmuneSystem); continue}
            "Infection:" => {army = Some(Army::Infection); continue}
            _ => {}
        }
        let army = army.ok_or_else(|| Error::parse("army heading", line))?;
        let caps = re.captures(line).ok_or_else(|| Error::parse("group", line))?;
        let (mut weak, mut immune) = (vec![], vec![]);
        for clause in caps.get(3).map_or("", |m| m.as_str()).split("; ").filter(|c| !c.is_empty()) {
            let (list, kinds) = if let Some(kinds) = clause.strip_prefix("weak to ") {
                (&mut weak, kinds)
            } else if let Some(kinds) = clause.strip_prefix("immune to ") {
                (&mut immune, kinds)
            } else {
                return Err(Error::parse("weakness or immunity", clause));
            };
            list.extend(kinds.split(", ").map(str::to_string));
        }
        if caps[2].parse::<u64>()? == 0 {return Err(Error::parse("group with hit points", line))}
        groups.push(Group {
            army,
            units: caps[1].parse()?,
            hp: caps[2].parse()?,
            damage: caps[4].parse()?,
            kind: caps[5].to_string(),
            initiative: caps[6].parse()?,
            weak,
            immune,
        });
    }
    Ok(groups)
}

/// Fights to the end with the immune system's damage raised by `boost`.
/// Returns the winning army and its remaining units, or `None` when a round
/// kills nothing and the fight can never end.
pub fn fight(groups: &[Group], boost: u64) -> Option<(Army, u64)> {
    let mut groups = groups.to_vec();
    for g in groups.iter_mut().filter(|g| g.army == Army::ImmuneSystem) {g.damage += boost;}
    loop {
        groups.retain(|g| g.units > 0);
        match groups.first() {
            None => return None,
            Some(first) if groups.iter().all(|g| g.army == first.army) => {
                return Some((first.army, groups.iter().map(|g| g.units).sum()));
            }
            _ => {}
        }

        let mut order = (0 .. groups.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| Reverse((groups[i].effective_power(), groups[i].initiative)));
        let mut targets: Vec<Option<usize>> = vec![None; groups.len()];
        for &i in &order {
            let attacker = &groups[i];
            let choice = (0 .. groups.len())
                .filter(|&j| groups[j].army != attacker.army && !targets.contains(&Some(j)))
                .filter(|&j| attacker.damage_to(&groups[j]) > 0)
                .max_by_key(|&j| (attacker.damage_to(&groups[j]), groups[j].effective_power(), groups[j].initiative));
            targets[i] = choice;
        }

        order.sort_by_key(|&i| Reverse(groups[i].initiative));
        let mut killed = 0;
        for i in order {
            let Some(j) = targets[i] else {continue};
            if groups[i].units == 0 {continue}
            let dead = (groups[i].damage_to(&groups[j]) / groups[j].hp).min(groups[j].units);
            groups[j].units -= dead;
            killed += dead;
        }
        if killed == 0 {return None}
    }
}

/// The smallest boost that lets the immune system win, and the units it keeps.
pub fn smallest_winning_boost(groups: &[Group]) -> Option<(u64, u64)> {
    let limit = groups.iter().map(|g| g.hp).max()?;
    (0 ..= limit).find_map(|boost| match fight(groups, boost) {
        Some((Army::ImmuneSystem, units)) => Some((boost, units)),
        outcome => {debug!("boost {} gives {:?}", boost, outcome); None}
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let groups = parse_groups(input)?;
    if part == 1 {
        let (_, units) = fight(&groups, 0).ok_or_else(|| Error::Unsolvable("the fight is a stalemate".into()))?;
        return Ok(units.to_string());
    }
    let (_, units) = smallest_winning_boost(&groups)
        .ok_or_else(|| Error::Unsolvable("no boost saves the reindeer".into()))?;
    Ok(units.to_string())
}
