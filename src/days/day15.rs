use std::collections::VecDeque;

use log::debug;

use super::nonempty_lines;
use crate::{Error, Result};

const WALL: u8 = b'#';
const OPEN: u8 = b'.';
const ELF: u8 = b'E';
const GOBLIN: u8 = b'G';

/// Row first, so that ordering positions is reading order.
type Pos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unit {pos: Pos, kind: u8, hp: i32}

#[derive(Debug, Clone)]
pub struct Cave {
    grid: Vec<Vec<u8>>,
    units: Vec<Unit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub full_rounds: u32,
    pub hp_left: i32,
    pub elves_lost: usize,
    pub winner: u8,
}

impl Outcome {
    pub fn score(&self) -> i64 {i64::from(self.full_rounds) * i64::from(self.hp_left)}
}

pub fn parse(input: &str) -> Result<Cave> {
    let grid: Vec<Vec<u8>> = nonempty_lines(input).map(|line| line.trim().as_bytes().to_vec()).collect();
    let mut units = vec![];
    for (y, row) in grid.iter().enumerate() {
        if row.len() != grid[0].len() {return Err(Error::parse("rectangular cave", String::from_utf8_lossy(row)))}
        for (x, &c) in row.iter().enumerate() {
            match c {
                ELF | GOBLIN => units.push(Unit {pos: (y, x), kind: c, hp: 200}),
                WALL | OPEN => {}
                _ => return Err(Error::parse("cave square", (c as char).to_string())),
            }
        }
        if row.first() != Some(&WALL) || row.last() != Some(&WALL) {
            return Err(Error::parse("cave walled on both sides", String::from_utf8_lossy(row)));
        }
    }
    if [grid.first(), grid.last()].iter().any(|row| row.map_or(true, |r| r.iter().any(|&c| c != WALL))) {
        return Err(Error::parse("cave walled above and below", input.trim()));
    }
    Ok(Cave {grid, units})
}

fn neighbours((y, x): Pos) -> [Pos; 4] {
    [(y - 1, x), (y, x - 1), (y, x + 1), (y + 1, x)]
}

impl Cave {
    /// Steps to every open square reachable from `from`.
    fn distances(&self, from: Pos) -> Vec<Vec<Option<u32>>> {
        let mut dist = vec![vec![None; self.grid[0].len()]; self.grid.len()];
        dist[from.0][from.1] = Some(0);
        let mut queue = VecDeque::from([(from, 0)]);
        while let Some((pos, d)) = queue.pop_front() {
            for (ny, nx) in neighbours(pos) {
                if self.grid[ny][nx] != OPEN || dist[ny][nx].is_some() {continue}
                dist[ny][nx] = Some(d + 1);
                queue.push_back(((ny, nx), d + 1));
            }
        }
        dist
    }

    /// The square unit `i` steps onto, if any enemy is reachable.
    fn next_step(&self, i: usize) -> Option<Pos> {
        let unit = self.units[i];
        let dist = self.distances(unit.pos);
        let (d, target) = self.units.iter()
            .filter(|u| u.hp > 0 && u.kind != unit.kind)
            .flat_map(|u| neighbours(u.pos))
            .filter_map(|(y, x)| dist[y][x].map(|d| (d, (y, x))))
            .filter(|&(d, _)| d > 0)
            .min()?;
        let back = self.distances(target);
        neighbours(unit.pos).into_iter()
            .filter(|&(y, x)| back[y][x] == Some(d - 1))
            .min()
    }

    /// Plays until one side is gone. With `fragile_elves` it gives up at the first elf death.
    pub fn battle(mut self, elf_power: i32, fragile_elves: bool) -> Option<Outcome> {
        let elves = self.units.iter().filter(|u| u.kind == ELF).count();
        let mut full_rounds = 0;
        loop {
            self.units.retain(|u| u.hp > 0);
            self.units.sort_by_key(|u| u.pos);
            for i in 0 .. self.units.len() {
                let unit = self.units[i];
                if unit.hp <= 0 {continue}
                if self.units.iter().all(|u| u.hp <= 0 || u.kind == unit.kind) {
                    let alive = self.units.iter().filter(|u| u.hp > 0);
                    let outcome = Outcome {
                        full_rounds,
                        hp_left: alive.clone().map(|u| u.hp).sum(),
                        elves_lost: elves - alive.filter(|u| u.kind == ELF).count(),
                        winner: unit.kind,
                    };
                    debug!("combat over: {:?}", outcome);
                    return Some(outcome);
                }

                let is_enemy = |u: &Unit, pos: Pos| u.hp > 0 && u.kind != unit.kind && u.pos == pos;
                let in_reach = |units: &[Unit], pos: Pos| neighbours(pos).iter().any(|&n| units.iter().any(|u| is_enemy(u, n)));
                if !in_reach(&self.units, unit.pos) {
                    if let Some(step) = self.next_step(i) {
                        self.grid[unit.pos.0][unit.pos.1] = OPEN;
                        self.grid[step.0][step.1] = unit.kind;
                        self.units[i].pos = step;
                    }
                }

                let pos = self.units[i].pos;
                let Some(j) = (0 .. self.units.len())
                    .filter(|&j| neighbours(pos).iter().any(|&n| is_enemy(&self.units[j], n)))
                    .min_by_key(|&j| (self.units[j].hp, self.units[j].pos))
                else {continue};
                self.units[j].hp -= if unit.kind == ELF {elf_power} else {3};
                if self.units[j].hp <= 0 {
                    let (y, x) = self.units[j].pos;
                    self.grid[y][x] = OPEN;
                    if fragile_elves && self.units[j].kind == ELF {return None}
                }
            }
            full_rounds += 1;
        }
    }
}

/// The lowest elf attack power at which no elf dies.
pub fn rescue(cave: &Cave) -> Option<(i32, Outcome)> {
    (4 ..= 200).find_map(|power| {
        let outcome = cave.clone().battle(power, true);
        debug!("elf power {} gives {:?}", power, outcome);
        outcome.map(|o| (power, o))
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let cave = parse(input)?;
    if part == 1 {
        let outcome = cave.battle(3, false).ok_or_else(|| Error::Unsolvable("the battle never ended".into()))?;
        return Ok(outcome.score().to_string());
    }
    let (_, outcome) = rescue(&cave).ok_or_else(|| Error::Unsolvable("no attack power keeps every elf alive".into()))?;
    Ok(outcome.score().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "#######\n#.G...#\n#...EG#\n#.#.#G#\n#..G#E#\n#.....#\n#######";

    #[test]
    fn published_battles() {
        for (cave, score) in [
            (FIRST, 27730),
            ("#######\n#G..#E#\n#E#E.E#\n#G.##.#\n#...#E#\n#...E.#\n#######", 36334),
            ("#######\n#E..EG#\n#.#G.E#\n#E.##E#\n#G..#.#\n#..E#.#\n#######", 39514),
            ("#######\n#E.G#.#\n#.#G..#\n#G.#.G#\n#G..#.#\n#...E.#\n#######", 27755),
            ("#######\n#.E...#\n#.#..G#\n#.###.#\n#E#G#G#\n#...#G#\n#######", 28944),
            ("#########\n#G......#\n#.E.#...#\n#..##..G#\n#...##..#\n#...#...#\n#.G...G.#\n#.....G.#\n#########", 18740),
        ] {
            assert_eq!(solve(1, cave).unwrap(), score.to_string(), "{}", cave);
        }
    }

    #[test]
    fn first_battle_in_detail() {
        let outcome = parse(FIRST).unwrap().battle(3, false).unwrap();
        assert_eq!(outcome, Outcome {full_rounds: 47, hp_left: 590, elves_lost: 2, winner: GOBLIN});
    }

    #[test]
    fn elves_need_more_power() {
        let (power, outcome) = rescue(&parse(FIRST).unwrap()).unwrap();
        assert_eq!((power, outcome.full_rounds, outcome.hp_left), (15, 29, 172));
        for (cave, score) in [
            (FIRST, 4988),
            ("#######\n#E..EG#\n#.#G.E#\n#E.##E#\n#G..#.#\n#..E#.#\n#######", 31284),
            ("#######\n#E.G#.#\n#.#G..#\n#G.#.G#\n#G..#.#\n#...E.#\n#######", 3478),
            ("#######\n#.E...#\n#.#..G#\n#.###.#\n#E#G#G#\n#...#G#\n#######", 6474),
            ("#########\n#G......#\n#.E.#...#\n#..##..G#\n#...##..#\n#...#...#\n#.G...G.#\n#.....G.#\n#########", 1140),
        ] {
            assert_eq!(solve(2, cave).unwrap(), score.to_string(), "{}", cave);
        }
    }

    #[test]
    fn moves_toward_the_first_square_in_reading_order() {
        let cave = parse("#######\n#E..G.#\n#...#.#\n#.G.#G#\n#######").unwrap();
        let i = cave.units.iter().position(|u| u.kind == ELF).unwrap();
        assert_eq!(cave.next_step(i), Some((1, 2)));
    }

    #[test]
    fn rejects_open_edges() {
        assert!(parse("#####\n#E.G.\n#####").is_err());
        assert!(parse("#####\n#E.x#\n#####").is_err());
    }
}
