use std::{
    io::{self, PipeReader, PipeWriter},
    os::unix::process::CommandExt,
    path::PathBuf,
    process::{self, Child},
};

use tracing::debug;

use crate::{execution::data::Command, redirect::FileRedirect};

/// Where a stage's standard input comes from.
#[derive(Debug)]
pub enum StageInput {
    Inherit,
    Pipe(PipeReader),
    File(PathBuf),
}

/// Where a stage's standard output goes.
#[derive(Debug)]
pub enum StageOutput {
    Inherit,
    Pipe(PipeWriter),
    File { path: PathBuf, append: bool },
}

#[derive(Debug)]
pub struct StageIo {
    pub stdin: StageInput,
    pub stdout: StageOutput,
}

impl StageIo {
    pub fn inherit() -> Self {
        Self {
            stdin: StageInput::Inherit,
            stdout: StageOutput::Inherit,
        }
    }
}

/// Process creation as seen by the executor.
///
/// Pipe ends handed to `spawn` belong to the spawner from then on and must be
/// closed once the child holds its own copy.
pub trait Spawner {
    type Child;

    fn pipe(&mut self) -> io::Result<(PipeReader, PipeWriter)> {
        io::pipe()
    }

    fn spawn(&mut self, command: &Command, io: StageIo) -> io::Result<Self::Child>;

    /// Blocks until the child exited or was killed by a signal.
    fn wait(&mut self, child: Self::Child) -> io::Result<()>;
}

/// Spawns real processes through `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    type Child = Child;

    fn spawn(&mut self, command: &Command, io: StageIo) -> io::Result<Child> {
        let mut builder = ChildBuilder::new(command);
        builder.stdin(io.stdin);
        builder.stdout(io.stdout);
        builder.build()
    }

    fn wait(&mut self, mut child: Child) -> io::Result<()> {
        // waitpid without WUNTRACED: stopped children are not reported
        let status = child.wait()?;
        debug!(pid = child.id(), %status, "child terminated");
        Ok(())
    }
}

pub struct ChildBuilder<'a> {
    command: &'a Command,
    stdin: StageInput,
    stdout: StageOutput,
}

impl<'a> ChildBuilder<'a> {
    pub fn new(command: &'a Command) -> Self {
        Self {
            command,
            stdin: StageInput::Inherit,
            stdout: StageOutput::Inherit,
        }
    }

    pub fn stdin(&mut self, stdin: StageInput) {
        self.stdin = stdin;
    }

    pub fn stdout(&mut self, stdout: StageOutput) {
        self.stdout = stdout;
    }

    pub fn build(self) -> io::Result<Child> {
        let (program, args) = self
            .command
            .argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let mut cmd = process::Command::new(program);
        cmd.args(args);

        let mut redirects = Vec::new();
        match self.stdin {
            StageInput::Inherit => {}
            StageInput::Pipe(reader) => {
                cmd.stdin(reader);
            }
            StageInput::File(path) => redirects.push(FileRedirect::input(&path)?),
        }
        match self.stdout {
            StageOutput::Inherit => {}
            StageOutput::Pipe(writer) => {
                cmd.stdout(writer);
            }
            StageOutput::File { path, append } => {
                redirects.push(FileRedirect::output(&path, append)?)
            }
        }

        // std dups the pipe ends onto stdin/stdout before running pre_exec, so
        // file redirections applied here take precedence. Every pipe descriptor
        // is close-on-exec, which keeps the other stages' ends out of the program.
        if !redirects.is_empty() {
            unsafe {
                cmd.pre_exec(move || {
                    for redirect in &redirects {
                        redirect.apply();
                    }
                    Ok(())
                });
            }
        }

        let child = cmd.spawn()?;
        debug!(pid = child.id(), program = %program, "spawned");
        Ok(child)
    }
}
