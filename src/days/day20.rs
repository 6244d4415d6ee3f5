use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Error, Result};

type Room = (i64, i64);

/// Doors leading out of each room, as discovered by walking the route regex.
pub type Map = FxHashMap<Room, Vec<Room>>;

fn open_door(map: &mut Map, a: Room, b: Room) {
    let out = map.entry(a).or_default();
    if !out.contains(&b) {out.push(b);}
    let back = map.entry(b).or_default();
    if !back.contains(&a) {back.push(a);}
}

/// Walks every route the regex allows at once. A group keeps the rooms it
/// started from and collects the rooms each branch ends in; those become
/// the rooms the group continues from.
pub fn build_map(regex: &str) -> Result<Map> {
    let mut map = Map::default();
    let mut current: FxHashSet<Room> = [(0, 0)].into_iter().collect();
    let mut groups: Vec<(FxHashSet<Room>, FxHashSet<Room>)> = vec![];
    let unbalanced = || Error::parse("balanced route regex", regex);
    for c in regex.trim().trim_start_matches('^').trim_end_matches('$').chars() {
        match c {
            'N' | 'S' | 'E' | 'W' => {
                let (dx, dy) = match c {'N' => (0, -1), 'S' => (0, 1), 'E' => (1, 0), _ => (-1, 0)};
                current = current.into_iter().map(|(x, y)| {
                    let next = (x + dx, y + dy);
                    open_door(&mut map, (x, y), next);
                    next
                }).collect();
            }
            '(' => groups.push((current.clone(), FxHashSet::default())),
            '|' => {
                let (starts, ends) = groups.last_mut().ok_or_else(unbalanced)?;
                ends.extend(current.drain());
                current = starts.clone();
            }
            ')' => {
                let (_, mut ends) = groups.pop().ok_or_else(unbalanced)?;
                ends.extend(current.drain());
                current = ends;
            }
            other => return Err(Error::parse("route direction", other.to_string())),
        }
    }
    if !groups.is_empty() {return Err(unbalanced())}
    Ok(map)
}

/// Fewest doors from the starting room to every reachable room.
pub fn distances(map: &Map) -> FxHashMap<Room, usize> {
    let mut dist = FxHashMap::default();
    dist.insert((0, 0), 0);
    let mut queue = VecDeque::from([(0, 0)]);
    while let Some(room) = queue.pop_front() {
        let d = dist[&room];
        for &next in map.get(&room).into_iter().flatten() {
            if !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let dist = distances(&build_map(input)?);
    Ok(if part == 1 {
        dist.values().copied().max().unwrap_or(0)
    } else {
        dist.values().filter(|&&d| d >= 1000).count()
    }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furthest_room() {
        assert_eq!(solve(1, "^WNE$").unwrap(), "3");
        assert_eq!(solve(1, "^ENWWW(NEEE|SSE(EE|N))$").unwrap(), "10");
        assert_eq!(solve(1, "^ENNWSWW(NEWS|)SSSEEN(WNSE|)EE(SWEN|)NNN$").unwrap(), "18");
        assert_eq!(solve(1, "^ESSWWN(E|NNENN(EESS(WNSE|)SSS|WWWSSSSE(SW|NNNE)))$").unwrap(), "23");
        assert_eq!(solve(1, "^WSSEESWWWNW(S|NENNEEEENN(ESSSSW(NWSW|SSEN)|WSWWN(E|WWS(E|SS))))$").unwrap(), "31");
    }

    #[test]
    fn rooms_far_away() {
        let long = format!("^{}$", "E".repeat(1004));
        assert_eq!(solve(2, &long).unwrap(), "5");
        assert_eq!(solve(2, "^ENWWW(NEEE|SSE(EE|N))$").unwrap(), "0");
    }

    #[test]
    fn unbalanced_groups() {
        assert!(build_map("^N(E|W$").is_err());
        assert!(build_map("^NE)$").is_err());
        assert!(build_map("^NX$").is_err());
    }
}
