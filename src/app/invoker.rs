use std::path::Path;

use crate::domain::{AppError, CurationParameters};
use crate::ports::{BuildScripts, Console, ContainerEngine};

pub const VERIFIER_IMAGE: &str = "verifier:latest";
pub const VERIFIER_LOG_FILE: &str = "verifier/verifier.log";

/// Issues the external builds, strictly sequentially, and treats a
/// successful image lookup as the only success signal.
pub struct BuildInvoker<'a, E: ContainerEngine, B: BuildScripts> {
    engine: &'a E,
    scripts: &'a B,
    root: &'a Path,
}

impl<'a, E: ContainerEngine, B: BuildScripts> BuildInvoker<'a, E, B> {
    pub fn new(engine: &'a E, scripts: &'a B, root: &'a Path) -> Self {
        Self { engine, scripts, root }
    }

    /// Build the verifier image (when attestation is configured) and then
    /// the graminized image. Returns the curated image name.
    ///
    /// A missing verifier image aborts before the main build is attempted.
    pub fn invoke<C: Console>(
        &self,
        console: &C,
        params: &CurationParameters,
    ) -> Result<String, AppError> {
        if params.attestation_mode.required() {
            console.show_message(
                "Building the RA-TLS verifier image, this might take a couple of minutes.",
            );
            console.show_message(&format!("You may monitor {VERIFIER_LOG_FILE} for progress."));
            self.scripts.run_verifier_build(
                params.attestation_mode.verifier_arg(),
                if params.encrypted_files_required() { "y" } else { "n" },
                &params.encryption_key_path_in_verifier(),
                &self.root.join(VERIFIER_LOG_FILE),
            )?;
            if !self.engine.image_exists(VERIFIER_IMAGE) {
                return Err(AppError::BuildFailed {
                    image: VERIFIER_IMAGE.to_string(),
                    log_file: VERIFIER_LOG_FILE.to_string(),
                });
            }
        }

        let log_file = params.log_file();
        console.show_message(
            "Your Gramine Shielded Container image is being created. This might take a few minutes.",
        );
        console.show_message(&format!("You may monitor {log_file} for detailed progress."));
        self.scripts.run_curation(&params.curation_args(), &self.root.join(&log_file))?;

        let image = params.gsc_image();
        if !self.engine.image_exists(&image) {
            return Err(AppError::BuildFailed { image, log_file });
        }
        Ok(image)
    }
}
