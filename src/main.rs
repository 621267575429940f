use std::io::{self, IsTerminal, Write};

use rsh::{
    completion::ShellCompleter,
    env::{ExecEnv, Streams},
    execution::process::OsSpawner,
    result::CommandResult,
};
use rustyline::{Editor, error::ReadlineError};

fn main() -> anyhow::Result<()> {
    let env = ExecEnv::build(rsh::get_path_env());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(env.config.log_level)
        .init();

    let mut rl = Editor::with_config(rustyline::Config::default())?;
    let completer = ShellCompleter::new(env.path_env.clone());
    rl.set_helper(Some(completer));

    if env.config.banner && io::stdin().is_terminal() {
        println!("Welcome to rsh!");
        println!("Type any system command, \"help\" for help, or \"exit\" to exit!");
    }

    let mut spawner = OsSpawner;
    loop {
        let readline = rl.readline(&env.prompt());
        let ret = match readline {
            Ok(line) => {
                let (mut stdout, mut stderr) = (io::stdout(), io::stderr());
                let mut streams = Streams::new(&mut stdout, &mut stderr);
                let ret = rsh::get_input_and_run(&line, &env, &mut spawner, &mut streams);
                io::stdout().flush()?;
                ret
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops the current line, like bash and zsh.
                CommandResult::Normal
            }
            Err(ReadlineError::Eof) => CommandResult::Exit,
            Err(e) => {
                return Err(anyhow::anyhow!(e));
            }
        };

        if ret == CommandResult::Exit {
            break;
        }
    }
    Ok(())
}
