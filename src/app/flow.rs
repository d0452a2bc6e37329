use std::path::{Path, PathBuf};

use crate::app::prompts::PromptCatalog;
use crate::domain::{
    AppError, AttestationMode, BuildType, CurationParameters, Distro, cmd_json, parse_env_vars,
};
use crate::ports::Console;
use crate::services::WorkloadFiles;

const SSL_CERT_FILES: [&str; 3] = ["ca.crt", "server.crt", "server.key"];

/// Ordered prompt sequence that assembles one `CurationParameters` record.
pub struct CurationFlow<'a, C: Console> {
    console: &'a C,
    catalog: &'a PromptCatalog,
    root: &'a Path,
}

impl<'a, C: Console> CurationFlow<'a, C> {
    pub fn new(console: &'a C, catalog: &'a PromptCatalog, root: &'a Path) -> Self {
        Self { console, catalog, root }
    }

    /// Walk the wizard:
    /// Args → EnvVars → RunFlags → EncryptedFiles → EncryptionKey? →
    /// Attestation → SigningKey (+ Passphrase).
    ///
    /// The encryption-key step runs only when encrypted files were supplied,
    /// and attestation loops until the record satisfies "encrypted files
    /// require attestation".
    pub fn run(
        &self,
        workload_type: &str,
        base_image_name: &str,
        distro: Distro,
        build_type: BuildType,
        workload: &WorkloadFiles,
    ) -> Result<CurationParameters, AppError> {
        let mut params = CurationParameters::new(workload_type, base_image_name, build_type);
        params.distro = distro;

        self.catalog.intro.run(self.console)?;

        let mut args = self.catalog.args.run(self.console)?;
        let common = workload.common_args();
        if !common.is_empty() {
            if !args.is_empty() {
                args.push(' ');
            }
            args.push_str(&common);
        }
        params.runtime_args = cmd_json(&args);

        let envs = self.catalog.env_vars.run(self.console)?;
        params.env_vars = parse_env_vars(&envs);

        params.docker_run_flags = self.catalog.run_flags.run(self.console)?;

        let encrypted = self.catalog.encrypted_files.run(self.console)?;
        params.encrypted_files = encrypted
            .split(':')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if params.encrypted_files_required() {
            let key = self.catalog.encryption_key.run(self.console)?;
            params.encryption_key_path = Some(absolute(&key));
        }

        loop {
            let mode = self.attestation_mode()?;
            if params.encrypted_files_required() && !mode.required() {
                self.console.show_error(
                    "You require Remote Attestation to provision the key for encrypted files.",
                );
                continue;
            }
            params.attestation_mode = mode;
            break;
        }

        let signing_input = self.catalog.signing_key.run(self.console)?;
        if signing_input == "test" {
            params.signing_key_path = None;
        } else {
            params.signing_key_path = Some(absolute(&signing_input));
            let passphrase = self.catalog.passphrase.run(self.console)?;
            params.passphrase =
                if passphrase.is_empty() { None } else { Some(passphrase) };
        }

        Ok(params)
    }

    /// Resolve the attestation step. `done` requires the full certificate
    /// triple under `verifier/ssl/`; missing files re-display the step.
    fn attestation_mode(&self) -> Result<AttestationMode, AppError> {
        loop {
            let input = self.catalog.attestation.run(self.console)?;
            match input.as_str() {
                "test" => return Ok(AttestationMode::Test),
                "done" => {
                    let ssl_dir = self.root.join("verifier").join("ssl");
                    if SSL_CERT_FILES.iter().all(|f| ssl_dir.join(f).is_file()) {
                        return Ok(AttestationMode::Production);
                    }
                    self.console
                        .show_error("One or more files does not exist at `verifier/ssl/` directory");
                }
                _ => return Ok(AttestationMode::None),
            }
        }
    }
}

fn absolute(path: &str) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path))
}
