mod exec;
mod render;

use std::io::{self, Write};

use crossterm::style::{Stylize, style};
use tracing::warn;

pub use exec::{CommandExecutor, ExecutionError, ShellExecutor};
pub use render::{
    DEFAULT_PLACEHOLDER, RenderedCommand, TargetHost, render_command, single_quote,
};

/// Print the command (cyan) and, when it targets a resolved host, run it.
///
/// A failed run is returned as a warning value; the command text has
/// already reached `out` by then.
pub fn deliver<W: Write>(
    rendered: &RenderedCommand,
    executor: Option<&dyn CommandExecutor>,
    out: &mut W,
) -> io::Result<Option<ExecutionError>> {
    writeln!(out, "{}", style(&rendered.line).cyan())?;
    out.flush()?;

    let Some(executor) = executor.filter(|_| rendered.host.is_resolved()) else {
        return Ok(None);
    };
    match executor.execute(&rendered.line) {
        Ok(()) => Ok(None),
        Err(err) => {
            warn!(error = %err, "curl invocation failed");
            Ok(Some(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: RefCell<Vec<String>>,
        fail: bool,
    }

    impl CommandExecutor for Recorder {
        fn execute(&self, line: &str) -> Result<(), ExecutionError> {
            self.lines.borrow_mut().push(line.to_string());
            if self.fail {
                Err(ExecutionError::Spawn {
                    shell: "sh".into(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no shell"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn rendered(host: TargetHost) -> RenderedCommand {
        RenderedCommand {
            line: "curl -v -X POST x/y -d '{}'".into(),
            host,
        }
    }

    #[test]
    fn placeholder_commands_are_only_printed() {
        let recorder = Recorder::default();
        let mut out = Vec::new();
        let warning = deliver(
            &rendered(TargetHost::default()),
            Some(&recorder),
            &mut out,
        )
        .unwrap();
        assert!(warning.is_none());
        assert!(recorder.lines.borrow().is_empty());
        assert!(String::from_utf8(out).unwrap().contains("curl -v -X POST"));
    }

    #[test]
    fn resolved_commands_are_executed() {
        let recorder = Recorder::default();
        let mut out = Vec::new();
        let command = rendered(TargetHost::Resolved("http://localhost".into()));
        deliver(&command, Some(&recorder), &mut out).unwrap();
        assert_eq!(recorder.lines.borrow().as_slice(), [command.line.clone()]);
    }

    #[test]
    fn execution_failure_is_a_warning() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut out = Vec::new();
        let command = rendered(TargetHost::Resolved("http://localhost".into()));
        let warning = deliver(&command, Some(&recorder), &mut out).unwrap();
        assert!(matches!(warning, Some(ExecutionError::Spawn { .. })));
    }

    #[test]
    fn disabled_execution_skips_resolved_hosts() {
        let mut out = Vec::new();
        let command = rendered(TargetHost::Resolved("http://localhost".into()));
        assert!(deliver(&command, None, &mut out).unwrap().is_none());
    }
}
