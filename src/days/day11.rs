use crate::{Error, Result};

const SIZE: usize = 300;

pub fn power_level(x: i64, y: i64, serial: i64) -> i64 {
    ((x + 10) * y + serial) * (x + 10) / 100 % 10 - 5
}

/// Summed-area table over the grid: `sums[y][x]` covers cells `1..=x` by `1..=y`.
fn summed_area(serial: i64) -> Vec<Vec<i64>> {
    let mut sums = vec![vec![0i64; SIZE + 1]; SIZE + 1];
    for y in 1 ..= SIZE {for x in 1 ..= SIZE {
        sums[y][x] = power_level(x as i64, y as i64, serial) + sums[y - 1][x] + sums[y][x - 1] - sums[y - 1][x - 1];
    }}
    sums
}

/// Top-left corner, side and total power of the strongest square whose
/// side lies in `sides`. Earlier candidates win ties.
pub fn best_square(serial: i64, sides: impl IntoIterator<Item = usize>) -> Option<(usize, usize, usize, i64)> {
    let sums = summed_area(serial);
    let mut best: Option<(usize, usize, usize, i64)> = None;
    for d in sides.into_iter().filter(|&d| (1 ..= SIZE).contains(&d)) {
        for y in 1 ..= SIZE - d + 1 {for x in 1 ..= SIZE - d + 1 {
            let (x1, y1) = (x + d - 1, y + d - 1);
            let power = sums[y1][x1] - sums[y - 1][x1] - sums[y1][x - 1] + sums[y - 1][x - 1];
            if best.map_or(true, |(_, _, _, p)| power > p) {best = Some((x, y, d, power));}
        }}
    }
    best
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let serial: i64 = input.trim().parse()?;
    let (x, y, d, _) = if part == 1 {best_square(serial, 3 ..= 3)} else {best_square(serial, 1 ..= SIZE)}
        .ok_or_else(|| Error::Unsolvable("no square fits".into()))?;
    Ok(if part == 1 {format!("{},{}", x, y)} else {format!("{},{},{}", x, y, d)})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_cell_power() {
        assert_eq!(power_level(3, 5, 8), 4);
        assert_eq!(power_level(122, 79, 57), -5);
        assert_eq!(power_level(217, 196, 39), 0);
        assert_eq!(power_level(101, 153, 71), 4);
    }

    #[test]
    fn best_three_by_three() {
        assert_eq!(best_square(18, [3]), Some((33, 45, 3, 29)));
        assert_eq!(solve(1, "42\n").unwrap(), "21,61");
    }

    #[test]
    fn best_of_any_size() {
        assert_eq!(solve(2, "18").unwrap(), "90,269,16");
        assert_eq!(best_square(42, 1 ..= SIZE), Some((232, 251, 12, 119)));
    }
}
