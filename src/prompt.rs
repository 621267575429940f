use std::path::Path;

/// ANSI colors used for the prompt and for describing instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub prompt_color: &'static str,
    pub command_color: &'static str,
    pub redirect_color: &'static str,
    pub pipe_color: &'static str,
    pub reset: &'static str,
}

impl Theme {
    pub const fn default() -> Self {
        Self {
            prompt_color: "\x1b[36m",
            command_color: "\x1b[32m",
            redirect_color: "\x1b[31m",
            pipe_color: "\x1b[36m",
            reset: "\x1b[0m",
        }
    }

    /// No escape sequences at all.
    pub const fn plain() -> Self {
        Self {
            prompt_color: "",
            command_color: "",
            redirect_color: "",
            pipe_color: "",
            reset: "",
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        format!("{}{}{}", color, text, self.reset)
    }

    pub fn command(&self, text: &str) -> String {
        self.paint(self.command_color, text)
    }

    pub fn redirect(&self, text: &str) -> String {
        self.paint(self.redirect_color, text)
    }

    pub fn pipe(&self, text: &str) -> String {
        self.paint(self.pipe_color, text)
    }

    /// Prompt for the given working directory: its last component, `~` for
    /// the home directory, falling back to `$ ` when the directory is unknown.
    pub fn prompt(&self, cwd: Option<&Path>, home: Option<&Path>) -> String {
        let Some(cwd) = cwd else {
            return "$ ".to_string();
        };
        let name = if home.is_some_and(|home| home == cwd) {
            "~".to_string()
        } else {
            match cwd.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => cwd.display().to_string(),
            }
        };
        format!("{} > ", self.paint(self.prompt_color, &name))
    }
}

pub const DEFAULT_THEME: Theme = Theme::default();
