//! Dice notation (`NdM`) parsing and rolling

use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use regex_lite::Regex;

/// Literal shown in place of a roll when the expression is rejected
pub const INVALID_DICE: &str = "Invalid dice format. Use format like 2d6 (up to 10d100).";

pub const MAX_DICE: u32 = 10;
pub const MAX_SIDES: u32 = 100;

static DICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d*)d(\d+)$").expect("dice pattern is valid")
});

/// Result of a successful roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    pub rolls: Vec<u32>,
}

impl DiceRoll {
    pub fn total(&self) -> u32 {
        self.rolls.iter().sum()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rolls: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        write!(f, "{} ({})", self.total(), rolls.join(", "))
    }
}

/// Parse `NdM` into `(count, sides)`, enforcing `1..=10` dice of `1..=100` sides
pub fn parse(expr: &str) -> Option<(u32, u32)> {
    let caps = DICE_RE.captures(expr.trim())?;
    let count = match caps.get(1).map(|m| m.as_str()).unwrap_or_default() {
        "" => 1,
        digits => digits.parse::<u32>().ok()?,
    };
    let sides = caps.get(2)?.as_str().parse::<u32>().ok()?;

    let in_bounds = (1..=MAX_DICE).contains(&count) && (1..=MAX_SIDES).contains(&sides);
    in_bounds.then_some((count, sides))
}

/// Roll an expression. An empty expression rolls one d6.
pub fn roll(expr: &str, rng: &mut dyn RngCore) -> Option<DiceRoll> {
    let (count, sides) = if expr.trim().is_empty() {
        (1, 6)
    } else {
        parse(expr)?
    };

    let rolls = (0..count).map(|_| rng.random_range(1..=sides)).collect();
    Some(DiceRoll { rolls })
}
