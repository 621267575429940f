use thiserror::Error;

use crate::execution::data::{Command, Instruction};

/// Characters separating tokens within a stage.
pub const TOKEN_DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Separates pipeline stages.
pub const PIPE_DELIMITER: char = '|';

/// A trailing argument equal to one of these turns the line into a dry run.
const DESCRIBE_MARKERS: [&str; 3] = ["ECHO", "PIPE", "IO"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error near `{0}': expected a file name")]
    MissingRedirectTarget(&'static str),
}

/// Splits `input` on runs of delimiters. No quoting or escaping is
/// interpreted, so `"a b"` is two tokens.
pub fn tokenize(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(TOKEN_DELIMITERS)
        .filter(|token| !token.is_empty())
}

/// Parses one pipeline stage.
///
/// `<`, `>` and `>>` consume the following token as their file name and never
/// end up in `argv`. When a direction is redirected more than once the last
/// one wins.
pub fn parse_command(stage: &str) -> Result<Command, ParseError> {
    let mut cmd = Command::default();
    let mut tokens = tokenize(stage);

    while let Some(token) = tokens.next() {
        match token {
            "<" => {
                let target = tokens.next().ok_or(ParseError::MissingRedirectTarget("<"))?;
                cmd.input_file = Some(target.into());
            }
            ">" | ">>" => {
                let op = if token == ">" { ">" } else { ">>" };
                let target = tokens.next().ok_or(ParseError::MissingRedirectTarget(op))?;
                cmd.append = op == ">>";
                cmd.output_file = Some(target.into());
            }
            _ => cmd.argv.push(token.to_string()),
        }
    }

    if cmd
        .argv
        .last()
        .is_some_and(|last| DESCRIBE_MARKERS.contains(&last.as_str()))
    {
        cmd.argv.pop();
        cmd.dry_run = true;
    }

    Ok(cmd)
}

/// Parses a full input line into its pipeline stages. `k` pipe characters
/// always produce `k + 1` commands, blank stages included.
pub fn parse_instruction(line: &str) -> Result<Instruction, ParseError> {
    let commands = line
        .split(PIPE_DELIMITER)
        .map(|stage| parse_command(stage.trim_matches(TOKEN_DELIMITERS)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Instruction::new(commands))
}
