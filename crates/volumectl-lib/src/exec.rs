//! Command execution — run a mixer tool with an environment overlay and
//! capture its standard output.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::process::{Command, Stdio};

use crate::error::{ExecCause, Result, VolumeError};

/// A single external command: program, arguments and the environment
/// variables to set on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    /// Append overlay variables. Later entries win over earlier ones.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Program name followed by its arguments.
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Space-joined command line, used in error messages.
    pub fn command_line(&self) -> String {
        self.tokens().join(" ")
    }
}

/// Merge an overlay onto a base environment. Overlay entries replace base
/// entries with the same key; among overlay entries the last one wins.
pub fn merge_env<B>(base: B, overlay: &[(String, String)]) -> BTreeMap<OsString, OsString>
where
    B: IntoIterator<Item = (OsString, OsString)>,
{
    let mut merged: BTreeMap<OsString, OsString> = base.into_iter().collect();
    for (key, value) in overlay {
        merged.insert(OsString::from(key), OsString::from(value));
    }
    merged
}

/// Runs an [`Invocation`] and returns its stdout.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>> {
        (**self).run(invocation)
    }
}

/// Runs commands as child processes of the current process.
///
/// Blocks until the child exits. No timeout: a hung tool hangs the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>> {
        log::debug!("running: {}", invocation.command_line());
        let env = merge_env(std::env::vars_os(), &invocation.env);
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VolumeError::Execution {
                command: invocation.command_line(),
                cause: ExecCause::Spawn(e),
            })?;

        if !output.status.success() {
            return Err(VolumeError::Execution {
                command: invocation.command_line(),
                cause: ExecCause::Status {
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                },
            });
        }
        Ok(output.stdout)
    }
}

// ── Test stub ──

/// Scriptable [`CommandRunner`] for unit and integration tests.
///
/// Every invocation is recorded. Responses are handed out in the order they
/// were queued; once the queue is down to one entry that entry is repeated.
/// With nothing queued, every call succeeds with empty output.
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Canned result for one [`MockRunner`] call.
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Successful exit with this stdout.
        Output(String),
        /// Non-zero exit with this code and stderr.
        Fail { code: i32, stderr: String },
        /// The program could not be spawned.
        NotFound,
    }

    #[derive(Default)]
    pub struct MockRunner {
        /// Recorded invocations, oldest first.
        pub calls: RefCell<Vec<Invocation>>,
        responses: RefCell<VecDeque<MockResponse>>,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Runner whose every call succeeds with `stdout`.
        pub fn with_output(stdout: &str) -> Self {
            let runner = Self::new();
            runner.push(MockResponse::Output(stdout.to_string()));
            runner
        }

        /// Runner whose every call exits with `code` and `stderr`.
        pub fn failing(code: i32, stderr: &str) -> Self {
            let runner = Self::new();
            runner.push(MockResponse::Fail {
                code,
                stderr: stderr.to_string(),
            });
            runner
        }

        pub fn push(&self, response: MockResponse) {
            self.responses.borrow_mut().push_back(response);
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        /// Token sequence of the most recent call.
        pub fn last_tokens(&self) -> Option<Vec<String>> {
            self.calls
                .borrow()
                .last()
                .map(|inv| inv.tokens().into_iter().map(String::from).collect())
        }

        fn next_response(&self) -> Option<MockResponse> {
            let mut queue = self.responses.borrow_mut();
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, invocation: &Invocation) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(invocation.clone());
            match self.next_response() {
                None => Ok(Vec::new()),
                Some(MockResponse::Output(s)) => Ok(s.into_bytes()),
                Some(MockResponse::Fail { code, stderr }) => Err(VolumeError::Execution {
                    command: invocation.command_line(),
                    cause: ExecCause::Status {
                        code: Some(code),
                        stderr,
                    },
                }),
                Some(MockResponse::NotFound) => Err(VolumeError::Execution {
                    command: invocation.command_line(),
                    cause: ExecCause::Spawn(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{}: not found", invocation.program),
                    )),
                }),
            }
        }
    }
}
