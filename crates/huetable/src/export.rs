//! Delivering rendered output: stdout for terminal text, a file otherwise.
//!
//! A destination that another process holds open (a workbook still open in a
//! spreadsheet application, typically) is not an error. The write is retried
//! until it succeeds, asking a [`ContentionPrompt`] to wait between attempts.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use console::Term;

use crate::error::RenderError;
use crate::notice::Notice;
use crate::options::{OutputTarget, RenderOptions};
use crate::plan::{prepare, Prepared};
use crate::render::{render_plan, TerminalRenderer};
use crate::table::Table;
use crate::view::EmptySelection;

/// Waits for a locked destination to be released.
pub trait ContentionPrompt {
    /// Called after a write to `path` failed with a contention error. The
    /// write is retried once this returns `Ok`; an `Err` ends the retries.
    fn wait_for_release(&mut self, path: &Path, err: &io::Error) -> io::Result<()>;
}

/// Asks the operator on stderr to close the file and press Enter.
///
/// Without a terminal on stdin there is nobody to press Enter, so the prompt
/// fails with [`io::ErrorKind::UnexpectedEof`] instead of waiting.
#[derive(Debug)]
pub struct TermPrompt {
    term: Term,
    interactive: bool,
}

impl Default for TermPrompt {
    fn default() -> Self {
        TermPrompt {
            term: Term::stderr(),
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl TermPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentionPrompt for TermPrompt {
    fn wait_for_release(&mut self, path: &Path, err: &io::Error) -> io::Result<()> {
        self.term
            .write_line(&format!("Cannot write {}: {}", path.display(), err))?;
        if !self.interactive {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin is not a terminal, cannot wait for the file to be released",
            ));
        }
        self.term
            .write_line("Close the file in any program using it, then press Enter to retry.")?;
        self.term.read_line()?;
        Ok(())
    }
}

/// What [`export`] did, with the notices raised while planning.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportOutcome {
    /// Terminal output went to stdout.
    Printed { notices: Vec<Notice> },
    Written { path: PathBuf, notices: Vec<Notice> },
    /// Group pagination matched nothing; nothing was written.
    Empty {
        selection: EmptySelection,
        notices: Vec<Notice>,
    },
}

impl ExportOutcome {
    pub fn notices(&self) -> &[Notice] {
        match self {
            ExportOutcome::Printed { notices }
            | ExportOutcome::Written { notices, .. }
            | ExportOutcome::Empty { notices, .. } => notices,
        }
    }
}

/// Whether `err` means another process holds the file.
pub fn is_contention(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32 | 33))
}

/// Runs `op` until it succeeds or fails with something other than
/// contention.
pub(crate) fn retry_locked<T, P, F>(
    path: &Path,
    prompt: &mut P,
    mut op: F,
) -> Result<T, RenderError>
where
    P: ContentionPrompt + ?Sized,
    F: FnMut() -> io::Result<T>,
{
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if is_contention(&err) => {
                tracing::warn!(path = %path.display(), error = %err, "destination locked, waiting");
                prompt.wait_for_release(path, &err)?;
            }
            Err(source) => {
                return Err(RenderError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// Renders `table` and delivers it.
///
/// Terminal output is printed with [`TerminalRenderer::print`]. Markup and
/// spreadsheet output are written to `options.output_path`, or to
/// `table.html` / `table.xlsx` in the working directory; their notices go to
/// stderr.
pub fn export<P>(
    table: &Table,
    options: &RenderOptions,
    prompt: &mut P,
) -> Result<ExportOutcome, RenderError>
where
    P: ContentionPrompt + ?Sized,
{
    let prepared = prepare(table, options, &mut rand::rng())?;

    if options.output == OutputTarget::Terminal {
        TerminalRenderer::new().print(&prepared)?;
        return Ok(match prepared {
            Prepared::Ready(plan) => ExportOutcome::Printed {
                notices: plan.notices().to_vec(),
            },
            Prepared::Empty { selection, notices } => ExportOutcome::Empty { selection, notices },
        });
    }

    let term = Term::stderr();
    let plan = match prepared {
        Prepared::Ready(plan) => plan,
        Prepared::Empty { selection, notices } => {
            report(&term, &notices)?;
            term.write_line(&selection.to_string())?;
            tracing::info!(%selection, "nothing to export");
            return Ok(ExportOutcome::Empty { selection, notices });
        }
    };
    report(&term, plan.notices())?;

    let path = match (&options.output_path, options.output.default_file_name()) {
        (Some(path), _) => path.clone(),
        (None, Some(name)) => PathBuf::from(name),
        (None, None) => return Err(RenderError::UnsupportedTarget(options.output.name())),
    };

    let output = render_plan(&plan)?;
    retry_locked(&path, prompt, || fs::write(&path, output.as_bytes()))?;
    tracing::info!(path = %path.display(), target = options.output.name(), "table exported");
    Ok(ExportOutcome::Written {
        path,
        notices: plan.notices().to_vec(),
    })
}

fn report(term: &Term, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        term.write_line(&notice.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingPrompt {
        calls: usize,
    }

    impl ContentionPrompt for CountingPrompt {
        fn wait_for_release(&mut self, _path: &Path, _err: &io::Error) -> io::Result<()> {
            self.calls += 1;
            Ok(())
        }
    }

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "locked")
    }

    #[test]
    fn test_contention_detection() {
        assert!(is_contention(&denied()));
        assert!(!is_contention(&io::Error::new(io::ErrorKind::NotFound, "gone")));
    }

    #[test]
    fn test_retry_until_released() {
        let mut prompt = CountingPrompt::default();
        let mut attempts = 0;
        let result = retry_locked(Path::new("t.xlsx"), &mut prompt, || {
            attempts += 1;
            if attempts < 3 {
                Err(denied())
            } else {
                Ok(attempts)
            }
        });
        assert_eq!(result.unwrap(), 3);
        assert_eq!(prompt.calls, 2);
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        let mut prompt = CountingPrompt::default();
        let result: Result<(), _> = retry_locked(Path::new("t.xlsx"), &mut prompt, || {
            Err(io::Error::new(io::ErrorKind::NotFound, "no dir"))
        });
        assert!(matches!(result, Err(RenderError::Write { .. })));
        assert_eq!(prompt.calls, 0);
    }

    #[test]
    fn test_prompt_failure_stops_retrying() {
        struct Closed;
        impl ContentionPrompt for Closed {
            fn wait_for_release(&mut self, _: &Path, _: &io::Error) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
            }
        }
        let result: Result<(), _> =
            retry_locked(Path::new("t.xlsx"), &mut Closed, || Err(denied()));
        assert!(matches!(result, Err(RenderError::Io(_))));
    }

    #[test]
    fn test_term_prompt_without_terminal_stops_retrying() {
        let mut prompt = TermPrompt {
            term: Term::stderr(),
            interactive: false,
        };
        let mut attempts = 0;
        let result: Result<(), _> = retry_locked(Path::new("t.xlsx"), &mut prompt, || {
            attempts += 1;
            Err(denied())
        });
        match result {
            Err(RenderError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(attempts, 1);
    }
}
