pub mod data;
pub mod process;

use std::{
    fmt::Display,
    fs::File,
    io::{PipeReader, PipeWriter, Write},
};

use tracing::{debug, warn};

use crate::{
    SHELL_NAME,
    builtin::{self, BuiltinExecFunc},
    env::Streams,
    execution::{
        data::{Command, Instruction},
        process::{Spawner, StageInput, StageIo, StageOutput},
    },
    result::{CommandResult, ExecError},
};

fn report(streams: &mut Streams<'_>, error: &dyn Display) {
    let _ = writeln!(streams.err, "{}: {}", SHELL_NAME, error);
}

/// Runs every stage of `instr` and waits for all of them.
///
/// Failures are reported on `streams.err` and never stop the shell, so the
/// result is always [`CommandResult::Normal`].
pub fn execute_instruction<S: Spawner>(
    instr: &Instruction,
    spawner: &mut S,
    streams: &mut Streams<'_>,
) -> CommandResult {
    let first = match instr.commands.first() {
        Some(cmd) if !cmd.is_empty() => cmd,
        _ => return CommandResult::Normal, // blank line
    };

    if instr.has_pipe() {
        execute_command_chain(&instr.commands, spawner, streams);
    } else {
        execute_command(first, spawner, streams);
    }
    CommandResult::Normal
}

/// Single stage: builtins run in-process, anything else is spawned and waited for.
pub fn execute_command<S: Spawner>(cmd: &Command, spawner: &mut S, streams: &mut Streams<'_>) {
    let Some(program) = cmd.program() else {
        return;
    };

    if let Some(func) = builtin::find_builtin(program) {
        run_builtin(func, cmd, streams);
        return;
    }

    let io = stage_io(cmd, None, None, true, true);
    match spawner.spawn(cmd, io) {
        Ok(child) => reap(spawner, vec![child]),
        Err(source) => report(streams, &ExecError::spawn(program, source)),
    }
}

fn run_builtin(func: BuiltinExecFunc, cmd: &Command, streams: &mut Streams<'_>) {
    let Some(path) = &cmd.output_file else {
        func(cmd.args(), streams);
        return;
    };

    let file = File::options()
        .create(true)
        .write(true)
        .append(cmd.append)
        .truncate(!cmd.append)
        .open(path);
    match file {
        Ok(mut file) => {
            let mut redirected = Streams::new(&mut file, &mut *streams.err);
            func(cmd.args(), &mut redirected);
        }
        Err(source) => report(
            streams,
            &ExecError::Redirect {
                path: path.clone(),
                source,
            },
        ),
    }
}

/// Pipeline of two or more stages.
///
/// All `n - 1` pipes exist before the first process is spawned. Once every
/// stage has been started the parent drops its copies of the pipe ends, so a
/// reader sees end-of-stream as soon as its writer exits, and then waits for
/// every child that was actually spawned.
pub fn execute_command_chain<S: Spawner>(
    commands: &[Command],
    spawner: &mut S,
    streams: &mut Streams<'_>,
) {
    if commands.iter().any(Command::is_empty) {
        report(streams, &ExecError::EmptyStage);
        return;
    }

    let stages = commands.len();
    let mut readers: Vec<Option<PipeReader>> = Vec::with_capacity(stages - 1);
    let mut writers: Vec<Option<PipeWriter>> = Vec::with_capacity(stages - 1);
    for _ in 1..stages {
        match spawner.pipe() {
            Ok((reader, writer)) => {
                readers.push(Some(reader));
                writers.push(Some(writer));
            }
            Err(source) => {
                // pipes created so far are closed on return
                report(streams, &ExecError::Pipe(source));
                return;
            }
        }
    }
    debug!(stages, pipes = readers.len(), "pipes allocated");

    let mut children = Vec::with_capacity(stages);
    for (i, cmd) in commands.iter().enumerate() {
        let pipe_in = i.checked_sub(1).and_then(|prev| readers[prev].take());
        let pipe_out = writers.get_mut(i).and_then(Option::take);
        let io = stage_io(cmd, pipe_in, pipe_out, i == 0, i == stages - 1);

        // argv is non-empty, checked above
        let program = cmd.program().unwrap_or_default();
        match spawner.spawn(cmd, io) {
            Ok(child) => children.push(child),
            Err(source) => {
                let error = ExecError::spawn(program, source);
                report(streams, &error);
                if error.is_fatal() {
                    break;
                }
            }
        }
    }

    drop(readers);
    drop(writers);
    reap(spawner, children);
}

/// Wiring for one stage. The first stage may read from its input file and
/// the last may write to its output file, overriding the pipe.
fn stage_io(
    cmd: &Command,
    pipe_in: Option<PipeReader>,
    pipe_out: Option<PipeWriter>,
    first: bool,
    last: bool,
) -> StageIo {
    let stdin = match (&cmd.input_file, pipe_in) {
        (Some(path), _) if first => StageInput::File(path.clone()),
        (_, Some(reader)) => StageInput::Pipe(reader),
        _ => StageInput::Inherit,
    };
    let stdout = match (&cmd.output_file, pipe_out) {
        (Some(path), _) if last => StageOutput::File {
            path: path.clone(),
            append: cmd.append,
        },
        (_, Some(writer)) => StageOutput::Pipe(writer),
        _ => StageOutput::Inherit,
    };

    if !first && let Some(path) = &cmd.input_file {
        warn!(path = %path.display(), "input redirection ignored on a piped stage");
    }
    if !last && let Some(path) = &cmd.output_file {
        warn!(path = %path.display(), "output redirection ignored on a piped stage");
    }

    StageIo { stdin, stdout }
}

fn reap<S: Spawner>(spawner: &mut S, children: Vec<S::Child>) {
    for child in children {
        if let Err(e) = spawner.wait(child) {
            warn!(error = %e, "failed to wait for child");
        }
    }
}
