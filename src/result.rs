use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandResult {
    Exit,
    Normal,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("{program}: command not found")]
    CommandNotFound { program: String },

    #[error("{program}: {source}")]
    NotExecutable { program: String, source: io::Error },

    /// The process could not be created at all, e.g. fork hit a resource limit.
    #[error("{program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("cannot open output file {}", .path.display())]
    Redirect { path: PathBuf, source: io::Error },

    #[error("syntax error near unexpected token `|'")]
    EmptyStage,
}

impl ExecError {
    /// Classifies an error returned while starting `program`.
    pub fn spawn(program: &str, source: io::Error) -> Self {
        let program = program.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => Self::CommandNotFound { program },
            io::ErrorKind::PermissionDenied => Self::NotExecutable { program, source },
            _ if source.raw_os_error() == Some(libc::ENOEXEC) => {
                Self::NotExecutable { program, source }
            }
            _ => Self::Spawn { program, source },
        }
    }

    /// Whether the rest of the pipeline has to be abandoned.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Pipe(_) | Self::Spawn { .. } | Self::EmptyStage)
    }
}
