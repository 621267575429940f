use std::{
    io::Write,
    ops::{Deref, DerefMut},
    path::PathBuf,
};

use directories::BaseDirs;
use tracing::Level;

use crate::prompt::{DEFAULT_THEME, Theme};

#[derive(Debug, Clone)]
pub struct PathEnv {
    pub paths: Vec<PathBuf>,
}

impl PathEnv {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl Default for PathEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for PathEnv {
    type Target = Vec<PathBuf>;

    fn deref(&self) -> &Self::Target {
        &self.paths
    }
}

impl DerefMut for PathEnv {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.paths
    }
}

/// Compile-time shell settings. There is no configuration file and the
/// binary takes no flags.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub theme: Theme,
    /// Print the welcome banner when stdin is a terminal.
    pub banner: bool,
    pub log_level: Level,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME,
            banner: true,
            log_level: Level::WARN,
        }
    }
}

#[derive(Debug)]
pub struct ExecEnv {
    pub path_env: PathEnv,
    pub base_dirs: Option<BaseDirs>,
    pub config: ShellConfig,
}

impl Default for ExecEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecEnv {
    pub fn new() -> Self {
        Self {
            path_env: PathEnv::new(),
            base_dirs: None,
            config: ShellConfig::default(),
        }
    }

    pub fn build(path_env: PathEnv) -> Self {
        Self {
            path_env,
            base_dirs: BaseDirs::new(),
            config: ShellConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    /// Prompt for the current working directory.
    pub fn prompt(&self) -> String {
        let cwd = std::env::current_dir().ok();
        let home = self.base_dirs.as_ref().map(BaseDirs::home_dir);
        self.config.theme.prompt(cwd.as_deref(), home)
    }
}

/// Where builtins print and where the shell reports its own diagnostics.
/// Spawned programs inherit the process' real stdout/stderr instead.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}
