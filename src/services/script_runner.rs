use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::AppError;
use crate::ports::BuildScripts;

const CURATION_SCRIPT: &str = "util/curation_script.sh";
const VERIFIER_HELPER: &str = "helper.sh";
const VERIFIER_DIR: &str = "verifier";

/// Runs the external curation and verifier-build shell scripts.
#[derive(Debug, Clone)]
pub struct ShellScriptRunner {
    root: PathBuf,
}

impl ShellScriptRunner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn run_logged(
        &self,
        program: &Path,
        args: &[String],
        cwd: &Path,
        log_file: &Path,
    ) -> Result<(), AppError> {
        // Truncates any previous run's log.
        let log = File::create(log_file)?;
        let log_err = log.try_clone()?;

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .status()
            .map_err(|e| AppError::Engine {
                command: program.display().to_string(),
                details: e.to_string(),
            })?;

        // Exit code intentionally unused: these scripts are long pipelines
        // with internal suppressed failures. The image lookup afterwards is
        // the authoritative success signal.
        let _ = status;
        Ok(())
    }
}

impl BuildScripts for ShellScriptRunner {
    fn run_curation(&self, args: &[String], log_file: &Path) -> Result<(), AppError> {
        self.run_logged(&self.root.join(CURATION_SCRIPT), args, &self.root, log_file)
    }

    fn run_verifier_build(
        &self,
        mode: &str,
        encrypted_files_required: &str,
        key_path_in_verifier: &str,
        log_file: &Path,
    ) -> Result<(), AppError> {
        let verifier_dir = self.root.join(VERIFIER_DIR);
        let args = vec![
            mode.to_string(),
            encrypted_files_required.to_string(),
            key_path_in_verifier.to_string(),
        ];
        self.run_logged(&verifier_dir.join(VERIFIER_HELPER), &args, &verifier_dir, log_file)
    }
}
