use crate::{Error, Result};

/// The two elves' scoreboard, starting from recipes 3 and 7.
pub struct Scoreboard {
    pub recipes: Vec<u8>,
    elves: [usize; 2],
}

impl Default for Scoreboard {
    fn default() -> Self {Scoreboard {recipes: vec![3, 7], elves: [0, 1]}}
}

impl Scoreboard {
    /// Appends one or two new recipes and moves both elves.
    pub fn round(&mut self) {
        let sum = self.recipes[self.elves[0]] + self.recipes[self.elves[1]];
        if sum > 9 {self.recipes.push(1);}
        self.recipes.push(sum % 10);
        for elf in &mut self.elves {
            *elf = (*elf + self.recipes[*elf] as usize + 1) % self.recipes.len();
        }
    }
}

/// The ten scores after the first `after` recipes.
pub fn next_ten(after: usize) -> String {
    let mut board = Scoreboard::default();
    while board.recipes.len() < after + 10 {board.round();}
    board.recipes[after .. after + 10].iter().map(|&d| (d + b'0') as char).collect()
}

/// How many recipes come before `digits` first shows up.
pub fn first_appearance(digits: &[u8]) -> usize {
    let mut board = Scoreboard::default();
    let mut checked = 0;
    loop {
        let len = board.recipes.len();
        while checked + digits.len() <= len {
            if board.recipes[checked .. checked + digits.len()] == *digits {return checked}
            checked += 1;
        }
        board.round();
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let input = input.trim();
    if part == 1 {return Ok(next_ten(input.parse()?))}
    if input.is_empty() || !input.bytes().all(|c| c.is_ascii_digit()) {
        return Err(Error::parse("score sequence", input));
    }
    Ok(first_appearance(&input.bytes().map(|c| c - b'0').collect::<Vec<_>>()).to_string())
}
