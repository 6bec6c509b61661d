//! Command runner using tokio::process

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::{CommandOutput, CommandRunner, CommandSpec, ProcessError};

/// Runs commands as child processes with a bounded wait
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn piped_if(enabled: bool) -> Stdio {
    if enabled {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

fn io_failure(program: &str, error: io::Error) -> ProcessError {
    if error.kind() == io::ErrorKind::NotFound {
        ProcessError::NotFound {
            program: program.to_string(),
        }
    } else {
        ProcessError::Io {
            program: program.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let (program, args) = spec.argv.split_first().ok_or_else(|| ProcessError::Io {
            program: String::new(),
            message: "empty argument vector".to_string(),
        })?;

        debug!(command = %spec.display(), timeout = %spec.timeout, "spawning");

        let mut child = Command::new(program)
            .args(args)
            .stdin(piped_if(spec.stdin.is_some()))
            .stdout(piped_if(spec.capture))
            .stderr(piped_if(spec.capture))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| io_failure(program, e))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let input = spec.stdin.as_deref();

        let outcome = tokio::time::timeout(spec.timeout.as_std(), async {
            let feed = async move {
                if let (Some(mut pipe), Some(bytes)) = (stdin, input) {
                    match pipe.write_all(bytes).await {
                        // The tool may exit without reading all of its input
                        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                        other => other?,
                    }
                    // Dropping the pipe closes stdin and signals end of input
                }
                Ok::<_, io::Error>(())
            };

            let (fed, out, err) = tokio::join!(feed, drain(stdout), drain(stderr));
            fed?;
            let status = child.wait().await?;

            Ok::<_, io::Error>(CommandOutput {
                exit_code: status.code(),
                stdout: out?,
                stderr: err?,
            })
        })
        .await;

        match outcome {
            Ok(result) => result.map_err(|e| io_failure(program, e)),
            Err(_) => {
                // Kill and reap so no process outlives the call
                if let Err(e) = child.kill().await {
                    warn!(command = %spec.display(), error = %e, "failed to kill timed out command");
                }
                Err(ProcessError::TimedOut(spec.timeout))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::domain::Timeout;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new(&["sh", "-c", script], Timeout::from_secs(5))
    }

    #[tokio::test]
    async fn captures_stdout() {
        let output = TokioCommandRunner::new()
            .run(&sh("printf 'hello\\n'"))
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, b"hello\n");
    }

    #[tokio::test]
    async fn captures_exit_code_and_stderr() {
        let output = TokioCommandRunner::new()
            .run(&sh("echo oops >&2; exit 3"))
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr_lossy(), "oops\n");
    }

    #[tokio::test]
    async fn feeds_stdin_and_closes_it() {
        let output = TokioCommandRunner::new()
            .run(&sh("cat").with_stdin("piped text"))
            .await
            .unwrap();

        assert_eq!(output.stdout, b"piped text");
    }

    #[tokio::test]
    async fn stdin_ignored_by_tool_is_fine() {
        let output = TokioCommandRunner::new()
            .run(&sh("exit 0").with_stdin(vec![b'x'; 1 << 20]))
            .await
            .unwrap();

        assert!(output.success());
    }

    #[tokio::test]
    async fn discarded_output_is_empty() {
        let output = TokioCommandRunner::new()
            .run(&sh("echo ignored; echo ignored >&2").discard_output())
            .await
            .unwrap();

        assert!(output.success());
        assert!(output.stdout.is_empty());
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn times_out_and_kills() {
        let spec = CommandSpec::new(&["sh", "-c", "sleep 10"], Timeout::from_millis(200));
        let started = Instant::now();

        let err = TokioCommandRunner::new().run(&spec).await.unwrap_err();

        assert!(matches!(err, ProcessError::TimedOut(t) if t.as_millis() == 200));
        assert!(started.elapsed().as_secs() < 5);
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let spec = CommandSpec::new(&["clipman-test-no-such-binary"], Timeout::from_secs(1));

        let err = TokioCommandRunner::new().run(&spec).await.unwrap_err();

        assert!(
            matches!(err, ProcessError::NotFound { ref program } if program == "clipman-test-no-such-binary")
        );
    }

    #[tokio::test]
    async fn empty_argv_is_rejected() {
        let spec = CommandSpec::new::<&str>(&[], Timeout::from_secs(1));
        let err = TokioCommandRunner::new().run(&spec).await.unwrap_err();
        assert!(matches!(err, ProcessError::Io { .. }));
    }
}
