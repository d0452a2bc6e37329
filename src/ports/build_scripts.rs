use std::path::Path;

use crate::domain::AppError;

/// External build-script collaborators.
///
/// Both calls block until the script finishes, with no timeout, and write
/// combined stdout/stderr to a freshly truncated log file. A script's exit
/// code is deliberately not reported: success is determined afterwards by
/// looking the expected image up in the container engine.
pub trait BuildScripts {
    /// Run the main curation script with its positional argument list.
    fn run_curation(&self, args: &[String], log_file: &Path) -> Result<(), AppError>;

    /// Run the verifier image build helper.
    fn run_verifier_build(
        &self,
        mode: &str,
        encrypted_files_required: &str,
        key_path_in_verifier: &str,
        log_file: &Path,
    ) -> Result<(), AppError>;
}
