#![allow(dead_code)]

use std::{
    ffi::OsStr,
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    ops::{Deref, DerefMut},
};

use rsh::{
    env::{ExecEnv, Streams},
    execution::process::OsSpawner,
    get_input_and_run,
    result::CommandResult,
};
use tempfile::NamedTempFile;

pub struct TempFile {
    file: Option<NamedTempFile>,
}

impl Deref for TempFile {
    type Target = NamedTempFile;

    fn deref(&self) -> &Self::Target {
        self.file.as_ref().unwrap()
    }
}

impl DerefMut for TempFile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.file.as_mut().unwrap()
    }
}

impl TempFile {
    pub fn build<S: AsRef<OsStr>>(prefix: S) -> Result<Self, io::Error> {
        let file = NamedTempFile::with_prefix(prefix)?;
        Ok(TempFile { file: Some(file) })
    }

    pub fn file(&mut self) -> &mut File {
        self.file.as_mut().unwrap().as_file_mut()
    }

    /// Everything written to the file so far, through any descriptor.
    pub fn contents(&mut self) -> String {
        let file = self.file();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut output = String::new();
        file.read_to_string(&mut output).unwrap();
        output
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = self.file.take().unwrap().close();
    }
}

/// Output of one line run through the real process spawner.
pub struct LineOutput {
    pub result: CommandResult,
    /// What builtins printed.
    pub out: String,
    /// Diagnostics printed by the shell itself.
    pub err: String,
}

pub fn run_line(line: &str) -> LineOutput {
    let env = ExecEnv::new();
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let result = {
        let mut streams = Streams::new(&mut out, &mut err);
        get_input_and_run(line, &env, &mut OsSpawner, &mut streams)
    };
    LineOutput {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}
