use crate::{Error, Result};

const MAX_TICKS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {North, South, West, East}

impl Dir {
    fn left(self) -> Dir {
        match self {Dir::North => Dir::West, Dir::West => Dir::South, Dir::South => Dir::East, Dir::East => Dir::North}
    }
    fn right(self) -> Dir {
        match self {Dir::North => Dir::East, Dir::East => Dir::South, Dir::South => Dir::West, Dir::West => Dir::North}
    }
}

#[derive(Debug, Clone, Copy)]
struct Cart {x: usize, y: usize, dir: Dir, turns: u8, crashed: bool}

impl Cart {
    fn advance(&mut self, map: &[Vec<u8>]) -> Result<()> {
        match self.dir {
            Dir::North => self.y = self.y.wrapping_sub(1),
            Dir::South => self.y += 1,
            Dir::West => self.x = self.x.wrapping_sub(1),
            Dir::East => self.x += 1,
        }
        let track = map.get(self.y).and_then(|row| row.get(self.x)).copied().unwrap_or(b' ');
        self.dir = match (track, self.dir) {
            (b'/', Dir::North | Dir::South) | (b'\\', Dir::East | Dir::West) => self.dir.right(),
            (b'/', _) | (b'\\', _) => self.dir.left(),
            (b'+', dir) => {
                self.turns = (self.turns + 1) % 3;
                match self.turns {1 => dir.left(), 2 => dir, _ => dir.right()}
            }
            (b'|' | b'-', dir) => dir,
            _ => return Err(Error::Unsolvable(format!("cart ran off the track at {},{}", self.x, self.y))),
        };
        Ok(())
    }
}

fn parse(input: &str) -> (Vec<Vec<u8>>, Vec<Cart>) {
    let mut map: Vec<Vec<u8>> = input.lines().map(|line| line.trim_end_matches('\r').as_bytes().to_vec()).collect();
    let mut carts = vec![];
    for (y, row) in map.iter_mut().enumerate() {
        for (x, c) in row.iter_mut().enumerate() {
            let (dir, track) = match *c {
                b'^' => (Dir::North, b'|'), b'v' => (Dir::South, b'|'),
                b'<' => (Dir::West, b'-'), b'>' => (Dir::East, b'-'),
                _ => continue,
            };
            *c = track;
            carts.push(Cart {x, y, dir, turns: 0, crashed: false});
        }
    }
    (map, carts)
}

/// Runs the carts tick by tick. Returns the first crash site, or with
/// `clear_wrecks` the position of the last cart standing.
pub fn simulate(input: &str, clear_wrecks: bool) -> Result<(usize, usize)> {
    let (map, mut carts) = parse(input);
    if carts.len() < 2 {return Err(Error::Unsolvable("fewer than two carts".into()))}
    for _ in 0 .. MAX_TICKS {
        carts.sort_unstable_by_key(|cart| (cart.y, cart.x));
        for i in 0 .. carts.len() {
            if carts[i].crashed {continue}
            carts[i].advance(&map)?;
            let (x, y) = (carts[i].x, carts[i].y);
            if let Some(j) = (0 .. carts.len()).find(|&j| j != i && !carts[j].crashed && carts[j].x == x && carts[j].y == y) {
                if !clear_wrecks {return Ok((x, y))}
                carts[i].crashed = true;
                carts[j].crashed = true;
            }
        }
        carts.retain(|cart| !cart.crashed);
        match carts[..] {
            [last] => return Ok((last.x, last.y)),
            [] => return Err(Error::Unsolvable("every cart crashed".into())),
            _ => {}
        }
    }
    Err(Error::Unsolvable("the carts kept running".into()))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (x, y) = simulate(input, part == 2)?;
    Ok(format!("{},{}", x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_collision() {
        assert_eq!(solve(1, "|\nv\n|\n|\n|\n^\n|\n").unwrap(), "0,3");
    }

    #[test]
    fn first_crash_on_the_loops() {
        let tracks = [
            r"/->-\        ",
            r"|   |  /----\",
            r"| /-+--+-\  |",
            r"| | |  | v  |",
            r"\-+-/  \-+--/",
            r"  \------/   ",
        ].join("\n");
        assert_eq!(solve(1, &tracks).unwrap(), "7,3");
    }

    #[test]
    fn last_cart_standing() {
        let tracks = [
            r"/>-<\  ",
            r"|   |  ",
            r"| /<+-\",
            r"| | | v",
            r"\>+</ |",
            r"  |   ^",
            r"  \<->/",
        ].join("\n");
        assert_eq!(solve(2, &tracks).unwrap(), "6,4");
    }

    #[test]
    fn lonely_cart() {
        assert!(solve(1, "->-").is_err());
    }
}
