use std::fs::{self, DirEntry, ReadDir};

use is_executable::IsExecutable;
use rustyline::{
    Helper, Highlighter, Hinter, Validator,
    completion::{Completer, Pair},
};

use crate::{
    builtin::BUILTIN_COMMANDS,
    env::PathEnv,
    parse::{PIPE_DELIMITER, TOKEN_DELIMITERS},
};

#[derive(Debug, Clone, Helper, Validator, Highlighter, Hinter)]
pub struct ShellCompleter {
    builtins: Vec<&'static str>,
    path_env: PathEnv,
}

impl ShellCompleter {
    pub fn new(path_env: PathEnv) -> Self {
        let builtins = BUILTIN_COMMANDS.with(|map| map.keys().copied().collect());
        Self { builtins, path_env }
    }

    fn candidate_executable_in_path<'a>(
        prefix: &'a str,
        path_env: &'a PathEnv,
    ) -> impl Iterator<Item = DirEntry> + 'a {
        fn dir_candidate_executable(
            prefix: &str,
            reader: ReadDir,
        ) -> impl Iterator<Item = DirEntry> {
            reader.flatten().filter(move |entry| {
                entry.path().is_executable()
                    && entry.file_name().to_string_lossy().starts_with(prefix)
            })
        }

        path_env
            .iter()
            .filter_map(move |dir| {
                if let Ok(entries) = fs::read_dir(dir) {
                    Some(dir_candidate_executable(prefix, entries))
                } else {
                    None
                }
            })
            .flatten()
    }

    /// Sorted, de-duplicated program names starting with `prefix`.
    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .builtins
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| cmd.to_string())
            .chain(
                Self::candidate_executable_in_path(prefix, &self.path_env)
                    .map(|entry| entry.file_name().to_string_lossy().to_string()),
            )
            .collect();
        matches.sort_unstable();
        matches.dedup();
        matches
    }
}

/// When the cursor is on the program name of a stage, returns where that
/// name starts and what has been typed of it so far.
pub fn program_prefix(line: &str, pos: usize) -> Option<(usize, &str)> {
    let before = line.get(..pos)?;
    let stage_start = before.rfind(PIPE_DELIMITER).map_or(0, |i| i + 1);
    let stage = &before[stage_start..];
    let typed = stage.trim_start_matches(TOKEN_DELIMITERS);
    if typed.contains(TOKEN_DELIMITERS) {
        // past the program name
        return None;
    }
    Some((pos - typed.len(), typed))
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let Some((start, prefix)) = program_prefix(line, pos) else {
            return Ok((pos, Vec::new()));
        };

        let matches = self
            .candidates(prefix)
            .into_iter()
            .map(|cmd| {
                let mut replacement = cmd.clone();
                replacement.push(' ');
                Pair {
                    display: cmd,
                    replacement,
                }
            })
            .collect();
        Ok((start, matches))
    }
}
