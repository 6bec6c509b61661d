//! In-memory fakes for the application ports.
//!
//! Each fake records what it was asked to do so tests can assert on the
//! exact command lines and payloads without touching the real system.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::ports::{
    CommandOutput, CommandRunner, CommandSpec, Environment, IpcError, KlipperConnector,
    KlipperProxy, NativeClipboard, NativeClipboardError, ProcessError,
};
use super::session::Collaborators;

/// Environment with a fixed OS, variables, directories and installed binaries
#[derive(Default)]
pub struct FakeEnvironment {
    pub os: String,
    pub android: bool,
    pub vars: HashMap<String, String>,
    pub dirs: HashSet<String>,
    pub binaries: HashSet<String>,
}

impl FakeEnvironment {
    pub fn new(os: &str) -> Self {
        Self {
            os: os.to_string(),
            ..Default::default()
        }
    }

    pub fn linux() -> Self {
        Self::new("Linux")
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string());
        self
    }

    pub fn with_binary(mut self, name: &str) -> Self {
        self.binaries.insert(name.to_string());
        self
    }

    pub fn android(mut self) -> Self {
        self.android = true;
        self
    }
}

impl Environment for FakeEnvironment {
    fn os_name(&self) -> String {
        self.os.clone()
    }

    fn has_android_marker(&self) -> bool {
        self.android
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    fn binary_installed(&self, name: &str) -> bool {
        self.binaries.contains(name)
    }
}

/// Build a successful output with the given stdout
pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Build a failed output with the given exit code and stderr
pub fn failed_output(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        exit_code: Some(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

enum RunnerMode {
    /// Pop one scripted response per call; succeed with empty stdout once exhausted
    Scripted(Mutex<VecDeque<Result<CommandOutput, ProcessError>>>),
    /// Behave like a clipboard tool: writes store stdin, reads print it plus a newline
    Clipboard(Mutex<String>),
}

/// Command runner that never spawns anything
pub struct FakeRunner {
    mode: RunnerMode,
    /// Every spec passed to `run`, in order
    pub calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn scripted(responses: Vec<Result<CommandOutput, ProcessError>>) -> Self {
        Self {
            mode: RunnerMode::Scripted(Mutex::new(responses.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn clipboard() -> Self {
        Self {
            mode: RunnerMode::Clipboard(Mutex::new(String::new())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn argv(&self, index: usize) -> Vec<String> {
        self.calls.lock().unwrap()[index].argv.clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.calls.lock().unwrap().push(spec.clone());
        match &self.mode {
            RunnerMode::Scripted(responses) => responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ok_output(""))),
            RunnerMode::Clipboard(store) => {
                let mut store = store.lock().unwrap();
                match &spec.stdin {
                    Some(input) => {
                        *store = String::from_utf8_lossy(input).into_owned();
                        Ok(ok_output(""))
                    }
                    None => Ok(ok_output(&format!("{}\n", store))),
                }
            }
        }
    }
}

/// Native backend holding the clipboard in memory
#[derive(Default)]
pub struct FakeNative {
    pub contents: Mutex<String>,
    pub fail: bool,
}

#[async_trait]
impl NativeClipboard for FakeNative {
    async fn paste(&self) -> Result<String, NativeClipboardError> {
        if self.fail {
            return Err(NativeClipboardError::PasteFailed("access denied".to_string()));
        }
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn copy(&self, text: &str) -> Result<(), NativeClipboardError> {
        if self.fail {
            return Err(NativeClipboardError::CopyFailed("access denied".to_string()));
        }
        *self.contents.lock().unwrap() = text.to_string();
        Ok(())
    }
}

/// How the fake Klipper behaves on connect and on calls
#[derive(Clone)]
pub enum KlipperBehavior {
    Live,
    LibraryMissing,
    CallFails,
}

/// Klipper connector whose proxies share one in-memory clipboard
pub struct FakeKlipper {
    pub behavior: KlipperBehavior,
    pub contents: Arc<Mutex<String>>,
    pub connects: Mutex<Vec<String>>,
}

impl FakeKlipper {
    pub fn new(behavior: KlipperBehavior) -> Self {
        Self {
            behavior,
            contents: Arc::new(Mutex::new(String::new())),
            connects: Mutex::new(Vec::new()),
        }
    }
}

struct FakeKlipperProxy {
    behavior: KlipperBehavior,
    contents: Arc<Mutex<String>>,
}

impl FakeKlipperProxy {
    fn check(&self) -> Result<(), IpcError> {
        match self.behavior {
            KlipperBehavior::Live => Ok(()),
            KlipperBehavior::LibraryMissing => {
                Err(IpcError::LibraryMissing("qdbus cannot load QtDBus".to_string()))
            }
            KlipperBehavior::CallFails => Err(IpcError::CallFailed(
                "The name org.kde.klipper was not provided by any .service files".to_string(),
            )),
        }
    }
}

#[async_trait]
impl KlipperProxy for FakeKlipperProxy {
    async fn get_clipboard_contents(&self) -> Result<String, IpcError> {
        self.check()?;
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn set_clipboard_contents(&self, text: &str) -> Result<(), IpcError> {
        self.check()?;
        *self.contents.lock().unwrap() = text.to_string();
        Ok(())
    }
}

#[async_trait]
impl KlipperConnector for FakeKlipper {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn KlipperProxy>, IpcError> {
        self.connects.lock().unwrap().push(endpoint.to_string());
        Ok(Box::new(FakeKlipperProxy {
            behavior: self.behavior.clone(),
            contents: Arc::clone(&self.contents),
        }))
    }
}

/// Wire fakes together, keeping handles to the runner for assertions
pub fn collaborators(environment: FakeEnvironment, runner: Arc<FakeRunner>) -> Collaborators {
    Collaborators {
        environment: Arc::new(environment),
        runner,
        klipper: Arc::new(FakeKlipper::new(KlipperBehavior::CallFails)),
        native: Arc::new(FakeNative::default()),
    }
}
