pub mod builtin;
pub mod completion;
pub mod env;
pub mod execution;
pub mod parse;
pub mod prompt;
pub mod redirect;
pub mod result;

use std::io::Write;

use crate::{
    env::{ExecEnv, PathEnv, Streams},
    execution::process::Spawner,
    result::CommandResult,
};

/// Prefix of every diagnostic the shell prints itself.
pub const SHELL_NAME: &str = "rsh";

/// A line starting with this ends the read loop.
pub const QUIT_CMD: &str = "exit";

pub fn get_path_env() -> PathEnv {
    match std::env::var_os("PATH") {
        None => PathEnv::new(),
        Some(paths) => {
            let paths: Vec<_> = std::env::split_paths(&paths).collect();
            PathEnv::from_paths(paths)
        }
    }
}

pub fn is_quit(input: &str) -> bool {
    input
        .trim_start_matches(parse::TOKEN_DELIMITERS)
        .starts_with(QUIT_CMD)
}

/// Parses and runs one line of input.
pub fn get_input_and_run<S: Spawner>(
    input: &str,
    env: &ExecEnv,
    spawner: &mut S,
    streams: &mut Streams<'_>,
) -> CommandResult {
    if is_quit(input) {
        return CommandResult::Exit;
    }

    let instr = match parse::parse_instruction(input) {
        Ok(instr) => instr,
        Err(e) => {
            let _ = writeln!(streams.err, "{}: {}", SHELL_NAME, e);
            return CommandResult::Normal;
        }
    };

    if instr.is_dry_run() {
        let _ = writeln!(streams.err, "{}", instr.describe(&env.config.theme));
        return CommandResult::Normal;
    }

    execution::execute_instruction(&instr, spawner, streams)
}
