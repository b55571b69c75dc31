// Small utility actions behind the user commands: dice, random choice and
// the input checks for repeat / dm_user.

use crate::core::errors::CommandError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Most times `/repeat` will send a message.
pub const MAX_REPEAT: u32 = 5;

/// Uniform roll in 1..=6.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

/// Uniform pick among the given options.
pub fn choose<'a, R: Rng + ?Sized>(options: &'a [String], rng: &mut R) -> Option<&'a String> {
    options.choose(rng)
}

pub fn validate_repeat(times: u32) -> Result<u32, CommandError> {
    match times {
        0 => Err(CommandError::validation("times must be at least 1")),
        t if t > MAX_REPEAT => Err(CommandError::validation(format!(
            "times cannot exceed {} to avoid flooding the channel",
            MAX_REPEAT
        ))),
        t => Ok(t),
    }
}

/// Parse a raw user id typed into a command.
pub fn parse_user_id(raw: &str) -> Result<u64, CommandError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(CommandError::validation("user ID must be numeric"));
    }
    match trimmed.parse::<u64>() {
        Ok(0) | Err(_) => Err(CommandError::validation("user ID is out of range")),
        Ok(id) => Ok(id),
    }
}
