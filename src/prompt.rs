//! Interactive district prompt
//!
//! Validation is a pure predicate and the re-ask loop is a two-state machine,
//! so neither needs a terminal to be exercised.

use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::errors::{LnmError, LnmResult};
use crate::models::Region;

pub const PROMPT: &str = "Which region would you like the LNM for? ";

/// Parse operator input as a district number greater than zero.
///
/// Reads like `parseInt`: leading whitespace and an optional sign, then the
/// leading run of digits; anything after the digits is ignored, so `"7.5"`
/// and `"7 days"` are district 7.
pub fn parse_region(input: &str) -> LnmResult<Region> {
    let invalid = || LnmError::InvalidRegion(input.to_string());

    let rest = input.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() || negative {
        return Err(invalid());
    }

    digits
        .parse::<u32>()
        .ok()
        .and_then(Region::new)
        .ok_or_else(invalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    AwaitingInput,
    Validated(Region),
}

#[derive(Debug)]
pub struct RegionPrompt {
    state: PromptState,
}

impl Default for RegionPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionPrompt {
    pub fn new() -> Self {
        Self {
            state: PromptState::AwaitingInput,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Feed one answer. Once validated, further input is ignored.
    pub fn feed(&mut self, answer: &str) -> LnmResult<PromptState> {
        if let PromptState::Validated(_) = self.state {
            return Ok(self.state);
        }
        let region = parse_region(answer)?;
        self.state = PromptState::Validated(region);
        Ok(self.state)
    }
}

/// Ask for a district until a valid one is entered.
///
/// Rejections are written to `output` and logged; only a closed input stream
/// or a broken terminal ends the loop with an error.
pub fn prompt_region<R: BufRead, W: Write>(mut input: R, mut output: W) -> LnmResult<Region> {
    let mut prompt = RegionPrompt::new();
    let mut line = String::new();

    loop {
        if let PromptState::Validated(region) = prompt.state() {
            debug!(%region, "District accepted");
            return Ok(region);
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(LnmError::InputClosed);
        }
        let answer = line.trim_end_matches(&['\r', '\n'][..]);

        if let Err(e) = prompt.feed(answer) {
            warn!("{}", e);
            writeln!(output, "{}", e)?;
        }
    }
}
