use std::{collections::HashMap, io::Write};

use crate::{SHELL_NAME, env::Streams};

pub type BuiltinExecFunc = fn(&[String], &mut Streams<'_>);

pub const HELP_MSG: &str = "\
Type any system command, exit to exit, cd [path] to change directory, or help for this message.
Commands can be chained with `|` and redirected with `< file`, `> file` or `>> file`.
";

// single thread, so we use thread_local
thread_local! {
    /// list of built-in commands
    pub static BUILTIN_COMMANDS: HashMap<&'static str, BuiltinExecFunc> = {
        let mut map = HashMap::<&'static str, BuiltinExecFunc>::new();
        map.insert("cd",   cd_command);
        map.insert("help", help_command);
        map
    };
}

macro_rules! builtin_output {
    ($streams:expr, $($arg:tt)*) => {
        let _ = write!($streams.out, $($arg)*);
    };
}

macro_rules! builtin_error {
    ($streams:expr, $($arg:tt)*) => {
        let _ = write!($streams.err, $($arg)*);
    };
}

pub fn find_builtin(name: &str) -> Option<BuiltinExecFunc> {
    BUILTIN_COMMANDS.with(|map| map.get(name).copied())
}

/// Changes the shell's own working directory, so every later child inherits it.
pub fn cd_command(args: &[String], streams: &mut Streams<'_>) {
    let Some(target) = args.first() else {
        builtin_error!(streams, "{}: expected argument to \"cd\"\n", SHELL_NAME);
        return;
    };

    if std::env::set_current_dir(target).is_err() {
        builtin_error!(streams, "cd: {}: No such file or directory\n", target);
    }
}

pub fn help_command(_: &[String], streams: &mut Streams<'_>) {
    builtin_output!(streams, "{}", HELP_MSG);
}
