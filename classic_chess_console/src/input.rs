use anyhow::{anyhow, bail};
use itertools::Itertools;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConsoleCommand {
    Move { from: (i8, i8), to: (i8, i8) },
    Quit,
}

// Accepts "e2 e4" (any case). Squares are converted to raw board pairs without a
// range check: "z9" yields a pair outside the board and the engine rejects it.
pub fn parse_command(line: &str) -> anyhow::Result<ConsoleCommand> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") {
        return Ok(ConsoleCommand::Quit);
    }
    let Some((from, to)) = line.split_ascii_whitespace().collect_tuple() else {
        bail!("Expected two squares like 'e2 e4', got '{line}'");
    };
    Ok(ConsoleCommand::Move {
        from: parse_square(from)?,
        to: parse_square(to)?,
    })
}

fn parse_square(token: &str) -> anyhow::Result<(i8, i8)> {
    let invalid = || anyhow!("Invalid square '{token}'");
    let (file, rank) = token.chars().collect_tuple().ok_or_else(invalid)?;
    if !file.is_ascii_alphabetic() {
        return Err(invalid());
    }
    let rank = rank.to_digit(10).ok_or_else(invalid)?;
    let x = (file.to_ascii_uppercase() as u8 - b'A') as i8;
    let y = 8 - rank as i8;
    Ok((x, y))
}
