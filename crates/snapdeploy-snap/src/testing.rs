//! Fakes for exercising the deployment steps without snapcraft

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use snapdeploy_core::error::CommandError;

use crate::reporter::{DeployEvent, DeployReporter};
use crate::runner::{CapturedOutput, CommandRunner, ToolCommand};

type RunHook = Box<dyn Fn(&ToolCommand, &Path) -> Result<(), CommandError> + Send + Sync>;

/// Records every command instead of running it
pub struct RecordingRunner {
    calls: Mutex<Vec<String>>,
    inputs: Mutex<Vec<Option<String>>>,
    login_output: CapturedOutput,
    on_run: Option<RunHook>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            inputs: Mutex::new(Vec::new()),
            login_output: CapturedOutput {
                success: true,
                code: Some(0),
                stdout: "Login successful.".to_string(),
                stderr: String::new(),
            },
            on_run: None,
        }
    }

    /// Output every captured command returns
    pub fn with_login_output(mut self, output: CapturedOutput) -> Self {
        self.login_output = output;
        self
    }

    /// Called for every `run`; its result is returned to the caller
    pub fn on_run<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ToolCommand, &Path) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.on_run = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<Option<String>> {
        self.inputs.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(command.to_string());
        match &self.on_run {
            Some(hook) => hook(command, cwd),
            None => Ok(()),
        }
    }

    fn capture(
        &self,
        command: &ToolCommand,
        _cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CapturedOutput, CommandError> {
        self.calls.lock().unwrap().push(command.to_string());
        self.inputs.lock().unwrap().push(stdin.map(str::to_string));
        Ok(self.login_output.clone())
    }
}

/// Collects reported events
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Only the `Log` messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DeployEvent::Log(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Names of folds that were started, in order
    pub fn folds(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DeployEvent::FoldStarted(name) => Some(name),
                _ => None,
            })
            .collect()
    }
}

impl DeployReporter for RecordingReporter {
    fn report(&self, event: &DeployEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Write a fake snap file into `dir`
pub fn create_snap(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), "test").unwrap();
}

/// A scratch directory inside the process cwd, plus its path relative to the cwd
pub fn relative_tempdir() -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::Builder::new()
        .prefix("snapdeploy-test-")
        .tempdir_in(".")
        .unwrap();
    let name = PathBuf::from(temp.path().file_name().unwrap());
    (temp, name)
}
