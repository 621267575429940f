use std::{fmt::Write as _, path::PathBuf};

use crate::prompt::Theme;

/// One stage of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments. Empty for a blank stage.
    pub argv: Vec<String>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    /// `>>` when true, `>` otherwise. Only meaningful with `output_file`.
    pub append: bool,
    /// The stage ended with a describe marker and must not be executed.
    pub dry_run: bool,
}

impl Command {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            ..Self::default()
        }
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// A full input line: stages in left-to-right order, `commands[i]` feeding
/// `commands[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub commands: Vec<Command>,
}

impl Instruction {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn has_pipe(&self) -> bool {
        self.commands.len() > 1
    }

    pub fn is_dry_run(&self) -> bool {
        self.commands.iter().any(|cmd| cmd.dry_run)
    }

    /// Human readable layout of the pipeline, e.g.
    /// `sort LT in.txt  PIPE uniq GT out.txt`.
    pub fn describe(&self, theme: &Theme) -> String {
        let mut out = String::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i != 0 {
                out.push_str(&theme.pipe(" PIPE "));
            }
            for (j, arg) in cmd.argv.iter().enumerate() {
                if j == 0 {
                    out.push_str(&theme.command(arg));
                    out.push(' ');
                } else {
                    let _ = write!(out, "{arg} ");
                }
            }
            if let Some(input) = &cmd.input_file {
                let _ = write!(out, "{} {} ", theme.redirect("LT"), input.display());
            }
            if let Some(output) = &cmd.output_file {
                let op = if cmd.append { "GTGT" } else { "GT" };
                let _ = write!(out, "{} {} ", theme.redirect(op), output.display());
            }
        }
        out
    }
}
