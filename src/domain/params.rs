use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;

use crate::domain::AppError;

/// Base-image distros the curation script knows how to graminize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distro {
    #[default]
    Ubuntu1804,
    Ubuntu2004,
    Debian10,
    Debian11,
}

impl Distro {
    /// Identifier passed to the curation script, `ID:VERSION_ID` form.
    pub fn id(self) -> &'static str {
        match self {
            Distro::Ubuntu1804 => "ubuntu:18.04",
            Distro::Ubuntu2004 => "ubuntu:20.04",
            Distro::Debian10 => "debian:10",
            Distro::Debian11 => "debian:11",
        }
    }

    /// Resolve a distro from the contents of an image's `/etc/os-release`.
    ///
    /// An unknown or unparseable distro is fatal; the flow must stop before
    /// any build attempt.
    pub fn from_os_release(contents: &str) -> Result<Self, AppError> {
        let id = capture(contents, r"(?m)^ID=(.*)$");
        let version_id = capture(contents, r#"(?m)^VERSION_ID="(.*)"$"#);
        let (id, version_id) = match (id, version_id) {
            (Some(id), Some(version)) => (id, version),
            _ => return Err(AppError::DistroUnsupported("<unknown>".to_string())),
        };

        let detected = format!("{}:{}", id.trim_matches('"'), version_id);
        match detected.as_str() {
            "ubuntu:18.04" => Ok(Distro::Ubuntu1804),
            "ubuntu:20.04" => Ok(Distro::Ubuntu2004),
            "debian:10" => Ok(Distro::Debian10),
            "debian:11" => Ok(Distro::Debian11),
            _ => Err(AppError::DistroUnsupported(detected)),
        }
    }
}

fn capture(text: &str, pattern: &str) -> Option<String> {
    if let Ok(re) = Regex::new(pattern) {
        return re.captures(text).map(|c| c[1].to_string());
    }
    None
}

/// How the curated image proves itself to a remote party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttestationMode {
    /// No remote attestation; no verifier image is built.
    #[default]
    None,
    /// Test certificates generated by the verifier build; local loopback topology.
    Test,
    /// User-provided certificates under `verifier/ssl/`.
    Production,
}

impl AttestationMode {
    pub fn required(self) -> bool {
        !matches!(self, AttestationMode::None)
    }

    /// `y`/`n` flag consumed by the curation script.
    pub fn flag(self) -> &'static str {
        if self.required() { "y" } else { "n" }
    }

    /// Mode argument consumed by the verifier helper script.
    pub fn verifier_arg(self) -> &'static str {
        match self {
            AttestationMode::Test => "test",
            _ => "done",
        }
    }
}

/// Gramine compilation mode for the curated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
    Debugoptimized,
}

impl BuildType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
            BuildType::Debugoptimized => "debugoptimized",
        }
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(BuildType::Release),
            "debug" => Ok(BuildType::Debug),
            "debugoptimized" => Ok(BuildType::Debugoptimized),
            other => Err(format!("invalid buildtype '{other}'")),
        }
    }
}

/// Everything the wizard collects for one curation run.
///
/// Created at flow start, exclusively owned and mutated by the flow, handed
/// to the build invoker and result reporter, then discarded.
#[derive(Debug, Default)]
pub struct CurationParameters {
    pub workload_type: String,
    pub base_image_name: String,
    pub distro: Distro,
    /// User arguments plus `common_args.txt`, serialized as `CMD [...]` JSON.
    pub runtime_args: String,
    /// Environment variables in insertion order.
    pub env_vars: Vec<(String, String)>,
    /// Free-text extra `docker run` flags.
    pub docker_run_flags: String,
    /// Relative paths to files Gramine should treat as encrypted.
    /// Non-empty only when attestation is configured.
    pub encrypted_files: Vec<String>,
    /// Set only when `encrypted_files` is non-empty.
    pub encryption_key_path: Option<PathBuf>,
    pub attestation_mode: AttestationMode,
    /// `None` means a generated test signing key.
    pub signing_key_path: Option<PathBuf>,
    /// Passphrase for the signing key; `None` means passphrase-less.
    pub passphrase: Option<String>,
    pub build_type: BuildType,
}

impl CurationParameters {
    pub fn new(workload_type: &str, base_image_name: &str, build_type: BuildType) -> Self {
        Self {
            workload_type: workload_type.to_string(),
            base_image_name: base_image_name.to_string(),
            build_type,
            ..Self::default()
        }
    }

    /// Name of the graminized output image.
    pub fn gsc_image(&self) -> String {
        format!("gsc-{}", self.base_image_name)
    }

    /// Per-run build log, relative to the working directory.
    pub fn log_file(&self) -> String {
        let sanitized = self.base_image_name.replace([':', '/'], "_");
        format!("workloads/{}/{}.log", self.workload_type, sanitized)
    }

    pub fn env_required(&self) -> bool {
        !self.env_vars.is_empty()
    }

    pub fn env_string(&self) -> String {
        serialize_env_vars(&self.env_vars)
    }

    pub fn encrypted_files_required(&self) -> bool {
        !self.encrypted_files.is_empty()
    }

    /// Colon-separated encrypted-file list as the curation script expects it.
    pub fn encrypted_files_arg(&self) -> String {
        self.encrypted_files.join(":")
    }

    /// Where the encryption key lands inside the verifier container.
    pub fn encryption_key_path_in_verifier(&self) -> String {
        match &self.encryption_key_path {
            Some(path) => match path.file_name() {
                Some(name) => format!("/keys/{}", name.to_string_lossy()),
                None => String::new(),
            },
            None => String::new(),
        }
    }

    fn signing_key_arg(&self) -> String {
        match &self.signing_key_path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => "test".to_string(),
        }
    }

    fn ca_cert_arg(&self) -> String {
        if self.attestation_mode.required() {
            "verifier/ssl_common/ca.crt".to_string()
        } else {
            String::new()
        }
    }

    /// Positional arguments for the main curation script.
    ///
    /// Ordering is the script's contract and must not change:
    /// workload type, base image, distro, signing key (or `test`), serialized
    /// args, attestation flag, build type, CA cert path, env-required flag,
    /// env string, encrypted-files-required flag, encrypted-file list,
    /// encryption-key path, passphrase.
    pub fn curation_args(&self) -> Vec<String> {
        vec![
            self.workload_type.clone(),
            self.base_image_name.clone(),
            self.distro.id().to_string(),
            self.signing_key_arg(),
            self.runtime_args.clone(),
            self.attestation_mode.flag().to_string(),
            self.build_type.as_str().to_string(),
            self.ca_cert_arg(),
            if self.env_required() { "y" } else { "n" }.to_string(),
            self.env_string(),
            if self.encrypted_files_required() { "y" } else { "n" }.to_string(),
            self.encrypted_files_arg(),
            self.encryption_key_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            self.passphrase.clone().unwrap_or_default(),
        ]
    }

    /// Positional arguments for the non-interactive test-image build.
    pub fn test_image_args(&self) -> Vec<String> {
        vec![
            self.workload_type.clone(),
            self.base_image_name.clone(),
            self.distro.id().to_string(),
            "test".to_string(),
            String::new(),
            "test-image".to_string(),
            self.build_type.as_str().to_string(),
        ]
    }
}

/// Parse `-e NAME="value"` text into insertion-ordered `(name, value)` pairs.
///
/// Accepts `-e NAME=value`, `-eNAME=value`, and bare `NAME=value` tokens;
/// anything else is ignored.
pub fn parse_env_vars(input: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();
    let tokens = shlex::split(input).unwrap_or_default();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        let assignment = if token == "-e" {
            match iter.next() {
                Some(next) => next,
                None => break,
            }
        } else if let Some(stripped) = token.strip_prefix("-e") {
            stripped.to_string()
        } else {
            token
        };
        if let Some((name, value)) = assignment.split_once('=') {
            if !name.is_empty() {
                vars.push((name.to_string(), value.to_string()));
            }
        }
    }
    vars
}

/// Canonical `-e NAME="value"` serialization for the curation script.
pub fn serialize_env_vars(vars: &[(String, String)]) -> String {
    vars.iter()
        .map(|(name, value)| format!("-e {name}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shell-split `args` and serialize them as a Dockerfile `CMD` JSON array.
/// Empty input yields an empty string.
pub fn cmd_json(args: &str) -> String {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let list = shlex::split(trimmed)
        .unwrap_or_else(|| trimmed.split_whitespace().map(str::to_string).collect());
    format!("CMD {}", serde_json::Value::from(list))
}
