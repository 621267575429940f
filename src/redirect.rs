use std::{
    ffi::CString,
    io,
    os::{fd::RawFd, unix::ffi::OsStrExt},
    path::Path,
};

use crate::SHELL_NAME;

/// A file to open onto one of the standard descriptors of a child.
///
/// Everything that needs allocating is prepared in the parent, so `apply`
/// only makes raw syscalls between fork and exec.
#[derive(Debug, Clone)]
pub struct FileRedirect {
    path: CString,
    flags: libc::c_int,
    target: RawFd,
    diagnostic: Vec<u8>,
}

impl FileRedirect {
    pub fn input(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: to_cstring(path)?,
            flags: libc::O_RDONLY,
            target: libc::STDIN_FILENO,
            diagnostic: format!("{}: cannot open input file {}\n", SHELL_NAME, path.display())
                .into_bytes(),
        })
    }

    pub fn output(path: &Path, append: bool) -> io::Result<Self> {
        let mode = if append { libc::O_APPEND } else { libc::O_TRUNC };
        Ok(Self {
            path: to_cstring(path)?,
            flags: libc::O_WRONLY | libc::O_CREAT | mode,
            target: libc::STDOUT_FILENO,
            diagnostic: format!("{}: cannot open output file {}\n", SHELL_NAME, path.display())
                .into_bytes(),
        })
    }

    /// Opens the file and moves it onto the target descriptor.
    ///
    /// On failure the diagnostic goes to the child's stderr and the child
    /// exits with status 1; the parent and sibling stages are unaffected.
    ///
    /// # Safety
    /// Must only be called in a freshly forked child before exec.
    pub(crate) unsafe fn apply(&self) {
        unsafe {
            let fd = libc::open(self.path.as_ptr(), self.flags, 0o666 as libc::c_uint);
            if fd == -1 {
                self.fail();
            }
            if fd != self.target {
                if libc::dup2(fd, self.target) == -1 {
                    self.fail();
                }
                libc::close(fd);
            }
        }
    }

    unsafe fn fail(&self) -> ! {
        unsafe {
            libc::write(
                libc::STDERR_FILENO,
                self.diagnostic.as_ptr().cast(),
                self.diagnostic.len(),
            );
            libc::_exit(1)
        }
    }
}

fn to_cstring(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_flags() {
        let truncate = FileRedirect::output(Path::new("out.txt"), false).unwrap();
        assert_eq!(truncate.flags & libc::O_TRUNC, libc::O_TRUNC);
        assert_eq!(truncate.flags & libc::O_APPEND, 0);
        assert_eq!(truncate.target, libc::STDOUT_FILENO);

        let append = FileRedirect::output(Path::new("out.txt"), true).unwrap();
        assert_eq!(append.flags & libc::O_APPEND, libc::O_APPEND);
        assert_eq!(append.flags & libc::O_TRUNC, 0);
    }

    #[test]
    fn input_diagnostic() {
        let input = FileRedirect::input(Path::new("missing.txt")).unwrap();
        assert_eq!(input.target, libc::STDIN_FILENO);
        assert_eq!(input.diagnostic, b"rsh: cannot open input file missing.txt\n");
    }

    #[test]
    fn nul_in_path_is_rejected() {
        let err = FileRedirect::input(Path::new("a\0b")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
