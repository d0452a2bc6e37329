use crate::domain::{AppError, Rule, validate};
use crate::ports::Console;
use crate::services::WorkloadFiles;

/// One named wizard stage: instruction text, commentary, a validation rule,
/// optional sentinel values that bypass the rule, and masked entry for
/// secrets.
#[derive(Debug, Clone)]
pub struct PromptStep {
    instructions: Vec<String>,
    help: Vec<String>,
    rule: Rule,
    sentinels: &'static [&'static str],
    secret: bool,
}

impl PromptStep {
    pub fn new(instructions: Vec<String>, help: Vec<String>, rule: Rule) -> Self {
        Self { instructions, help, rule, sentinels: &[], secret: false }
    }

    /// Values that bypass the rule entirely and are returned as-is. This is
    /// how "use defaults" / "skip this step" semantics work.
    pub fn with_sentinels(mut self, sentinels: &'static [&'static str]) -> Self {
        self.sentinels = sentinels;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Display the step and block until the user supplies a value passing
    /// the rule (or a sentinel). Validation failures re-display the step
    /// with the error and block again, indefinitely.
    pub fn run<C: Console>(&self, console: &C) -> Result<String, AppError> {
        console.show_step(&self.instructions, &self.help);
        loop {
            let raw = if self.secret {
                console.read_secret(">>")?
            } else {
                console.read_line(">>")?
            };
            let value = raw.trim().to_string();

            if self.sentinels.contains(&value.as_str()) {
                return Ok(value);
            }
            match validate(&value, &self.rule) {
                Ok(accepted) => return Ok(accepted),
                Err(error) => {
                    console.show_step(&self.instructions, &self.help);
                    console.show_error(&error.to_string());
                }
            }
        }
    }
}

/// All wizard step texts, constructed once at flow start and passed by
/// reference. Instructional text is pre-populated with workload-specific
/// example values where the auxiliary files provide them.
pub struct PromptCatalog {
    pub intro: PromptStep,
    pub args: PromptStep,
    pub env_vars: PromptStep,
    pub run_flags: PromptStep,
    pub encrypted_files: PromptStep,
    pub encryption_key: PromptStep,
    pub attestation: PromptStep,
    pub signing_key: PromptStep,
    pub passphrase: PromptStep,
}

impl PromptCatalog {
    pub fn new(workload_type: &str, workload: &WorkloadFiles) -> Self {
        let intro = PromptStep::new(
            vec![
                "This application provides step-by-step guidance for creating your own custom \
                 containers protected by Gramine."
                    .to_string(),
                "Press ENTER to get started.".to_string(),
            ],
            vec![
                "Stages: command-line arguments, environment variables, docker run flags, \
                 encrypted files and key provisioning, remote attestation, enclave signing, \
                 image generation, run-command generation."
                    .to_string(),
            ],
            Rule::Optional,
        );

        let mut args_lines = vec![
            ">> Command-line arguments:".to_string(),
            "Specify docker command-line arguments in a single string, e.g. for `docker run \
             <image> arg1 arg2` provide `arg1 arg2`. No input skips this step."
                .to_string(),
        ];
        push_example(&mut args_lines, "command-line arguments", workload_type, &workload.insecure_args());
        let args = PromptStep::new(
            args_lines,
            vec![
                "Gramine ignores arguments provided at docker run-time; attacker-controlled \
                 arguments can break the security of the resulting enclave, so provide them \
                 here now."
                    .to_string(),
            ],
            Rule::Optional,
        );

        let mut env_lines = vec![
            ">> Environment variables:".to_string(),
            "Specify environment variables in the format: -e ENV_NAME1=\"value1\" -e \
             ENV_NAME2=\"value2\". No input skips this step."
                .to_string(),
        ];
        push_example(&mut env_lines, "environment variables", workload_type, &workload.env_vars());
        let env_vars = PromptStep::new(
            env_lines,
            vec![
                "Gramine ignores environment variables specified at runtime; variables set in \
                 the base image are added by default."
                    .to_string(),
            ],
            Rule::Optional,
        );

        let mut flags_lines = vec![
            ">> Additional docker run flags:".to_string(),
            "Specify docker run flags in a single string, e.g. for `docker run flag1 flag2 \
             <image>` provide `flag1 flag2`. No input skips this step."
                .to_string(),
        ];
        push_example(&mut flags_lines, "docker run flags", workload_type, &workload.docker_run_flags());
        let run_flags = PromptStep::new(
            flags_lines,
            vec![
                "These flags are embedded into the docker run instructions written to \
                 commands.txt at the end of curation. Examples: --rm, --name, --network."
                    .to_string(),
            ],
            Rule::Optional,
        );

        let mut enc_lines = vec![
            ">> Encrypted files and key provisioning:".to_string(),
            "Provide paths, relative to the working directory, of the files Gramine should \
             treat as encrypted. Accepted format: `file_path1:file_path2`. No input skips \
             this step."
                .to_string(),
        ];
        push_example(&mut enc_lines, "encrypted files input", workload_type, &workload.encrypted_files());
        let encrypted_files = PromptStep::new(
            enc_lines,
            vec![
                "Gramine's Encrypted FS feature transparently decrypts data using the \
                 encryption key provisioned after successful attestation."
                    .to_string(),
            ],
            Rule::Optional,
        );

        let encryption_key = PromptStep::new(
            vec![
                ">> Encryption key:".to_string(),
                "Provide the path to the key used for the encryption.".to_string(),
            ],
            vec![
                "The key is forwarded to the workload by the verifier only after successful \
                 attestation."
                    .to_string(),
            ],
            Rule::FileExists,
        );

        let attestation = PromptStep::new(
            vec![
                ">> Remote Attestation:".to_string(),
                "To enable remote attestation, copy the ca.crt, server.crt, and server.key \
                 certificates into the verifier/ssl/ directory using another terminal."
                    .to_string(),
                "NOTE: Gramine's Encrypted Filesystem requires attestation to provision a \
                 decryption key for encrypted files."
                    .to_string(),
                "- Type done when ready, OR".to_string(),
                "- Type test to create test certificates, OR".to_string(),
                "- No input (blank) to skip attestation.".to_string(),
            ],
            vec![
                "This step lets the enclave talk to a remote verifier over an RA-TLS link. \
                 The CA certificate TLS-authenticates the verifier during the RA-TLS flow."
                    .to_string(),
                "Further reading: https://gramine.readthedocs.io/en/stable/attestation.html"
                    .to_string(),
            ],
            Rule::OneOf(&["test", "done", ""]),
        );

        let signing_key = PromptStep::new(
            vec![
                ">> Enclave signing:".to_string(),
                "Provide the path to your enclave signing key, OR type test to generate a \
                 test signing key."
                    .to_string(),
            ],
            vec![
                "SGX requires RSA 3072 keys with public exponent 3. Generate one protected \
                 by a test passphrase with:"
                    .to_string(),
                "openssl genrsa -3 -aes128 -passout pass:test@123 -out enclave-key.pem 3072"
                    .to_string(),
            ],
            Rule::FileExists,
        )
        .with_sentinels(&["test"]);

        let passphrase = PromptStep::new(
            vec![
                ">> Enter the passphrase for the signing key (no input assumes a \
                 passphrase-less key)"
                    .to_string(),
            ],
            vec![],
            Rule::Optional,
        )
        .secret();

        Self {
            intro,
            args,
            env_vars,
            run_flags,
            encrypted_files,
            encryption_key,
            attestation,
            signing_key,
            passphrase,
        }
    }
}

fn push_example(lines: &mut Vec<String>, what: &str, workload_type: &str, example: &str) {
    if !example.is_empty() {
        lines.push(format!("e.g. {what} for {workload_type} would be: {example}"));
    }
}
