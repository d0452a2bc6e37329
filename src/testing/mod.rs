//! Shared in-crate test doubles for the wizard's ports.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::Path;

use crate::domain::AppError;
use crate::ports::{BuildScripts, Console, ContainerEngine};

type ReadHook = Box<dyn Fn(usize)>;

/// Console fed from a pre-scripted input queue.
pub(crate) struct ScriptedConsole {
    inputs: RefCell<VecDeque<String>>,
    errors: RefCell<Vec<String>>,
    messages: RefCell<Vec<String>>,
    reads: RefCell<usize>,
    secret_reads: RefCell<usize>,
    read_hook: RefCell<Option<ReadHook>>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            errors: RefCell::new(Vec::new()),
            messages: RefCell::new(Vec::new()),
            reads: RefCell::new(0),
            secret_reads: RefCell::new(0),
            read_hook: RefCell::new(None),
        }
    }

    /// Install a hook invoked before each read with the zero-based read
    /// index, for tests that mutate the filesystem between attempts.
    pub fn on_read<F: Fn(usize) + 'static>(&self, hook: F) {
        *self.read_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn secret_reads(&self) -> usize {
        *self.secret_reads.borrow()
    }

    fn next_input(&self) -> Result<String, AppError> {
        let index = *self.reads.borrow();
        if let Some(hook) = self.read_hook.borrow().as_ref() {
            hook(index);
        }
        *self.reads.borrow_mut() += 1;
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AppError::Console("scripted input exhausted".to_string()))
    }
}

impl Console for ScriptedConsole {
    fn show_step(&self, _instructions: &[String], _help: &[String]) {}

    fn show_error(&self, error: &str) {
        self.errors.borrow_mut().push(error.to_string());
    }

    fn show_message(&self, text: &str) {
        self.messages.borrow_mut().push(text.to_string());
    }

    fn read_line(&self, _prompt: &str) -> Result<String, AppError> {
        self.next_input()
    }

    fn read_secret(&self, _prompt: &str) -> Result<String, AppError> {
        *self.secret_reads.borrow_mut() += 1;
        self.next_input()
    }
}

/// In-memory container engine.
pub(crate) struct StubEngine {
    images: RefCell<HashSet<String>>,
    pulled: RefCell<Vec<String>>,
    pub os_release: String,
    pub pull_succeeds: bool,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            images: RefCell::new(HashSet::new()),
            pulled: RefCell::new(Vec::new()),
            os_release: String::new(),
            pull_succeeds: true,
        }
    }

    pub fn with_images(names: &[&str]) -> Self {
        let engine = Self::new();
        for name in names {
            engine.add_image(name);
        }
        engine
    }

    pub fn add_image(&self, name: &str) {
        self.images.borrow_mut().insert(name.to_string());
    }

    pub fn pulled(&self) -> Vec<String> {
        self.pulled.borrow().clone()
    }
}

impl ContainerEngine for StubEngine {
    fn image_exists(&self, name: &str) -> bool {
        self.images.borrow().contains(name)
    }

    fn pull_image(&self, name: &str) -> Result<(), AppError> {
        self.pulled.borrow_mut().push(name.to_string());
        if self.pull_succeeds {
            self.add_image(name);
            Ok(())
        } else {
            Err(AppError::ImageFetch(name.to_string()))
        }
    }

    fn read_os_release(&self, _image: &str) -> Result<String, AppError> {
        Ok(self.os_release.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScriptCall {
    Curation { args: Vec<String>, log_file: String },
    VerifierBuild { mode: String, encrypted_files_required: String, key_path: String },
}

/// Build-script stub that records invocation order and optionally writes a
/// canned log.
pub(crate) struct RecordingScripts {
    calls: RefCell<Vec<ScriptCall>>,
    pub curation_log: String,
}

impl RecordingScripts {
    pub fn new() -> Self {
        Self { calls: RefCell::new(Vec::new()), curation_log: String::new() }
    }

    pub fn calls(&self) -> Vec<ScriptCall> {
        self.calls.borrow().clone()
    }
}

impl BuildScripts for RecordingScripts {
    fn run_curation(&self, args: &[String], log_file: &Path) -> Result<(), AppError> {
        if !self.curation_log.is_empty() {
            std::fs::write(log_file, &self.curation_log)?;
        }
        self.calls.borrow_mut().push(ScriptCall::Curation {
            args: args.to_vec(),
            log_file: log_file.display().to_string(),
        });
        Ok(())
    }

    fn run_verifier_build(
        &self,
        mode: &str,
        encrypted_files_required: &str,
        key_path_in_verifier: &str,
        _log_file: &Path,
    ) -> Result<(), AppError> {
        self.calls.borrow_mut().push(ScriptCall::VerifierBuild {
            mode: mode.to_string(),
            encrypted_files_required: encrypted_files_required.to_string(),
            key_path: key_path_in_verifier.to_string(),
        });
        Ok(())
    }
}
