use std::fs;
use std::path::Path;

use crate::domain::{AppError, AttestationMode, BuildType, CurationParameters, Measurements};
use crate::ports::Console;

pub const COMMANDS_FILE: &str = "commands.txt";

const SSL_COMMON_DIR: &str = "verifier/ssl_common";
const VERIFIER_CERT_MOUNT_POINT: &str = "/ra-tls-secret-prov/ssl";
const KEYS_MOUNT_POINT: &str = "/keys";
const DNS_PLACEHOLDER: &str = "<verifier-dns-name:port>";
const LOOPBACK_SERVER: &str = "\"localhost:4433\"";
const HOST_NET: &str = "--net=host";

/// Formats the final run instructions, persists them to `commands.txt`, and
/// echoes them to the user.
pub struct ResultReporter<'a> {
    root: &'a Path,
}

impl<'a> ResultReporter<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn report<C: Console>(
        &self,
        console: &C,
        params: &CurationParameters,
    ) -> Result<String, AppError> {
        let block = self.run_commands(params)?;
        fs::write(self.root.join(COMMANDS_FILE), &block)?;

        console.show_message(&format!(
            "The curated GSC image {} is ready. The instructions below are saved to {} as well.",
            params.gsc_image(),
            COMMANDS_FILE
        ));
        console.show_message(&block);
        if params.build_type == BuildType::Release {
            console.show_message(&format!(
                "In the event of runtime failures, re-run with `-b debug` for more information. \
                 The {}.manifest can also be modified to change enclave memory or thread defaults.",
                params.workload_type
            ));
        }
        Ok(block)
    }

    fn run_commands(&self, params: &CurationParameters) -> Result<String, AppError> {
        let mut flags = params.docker_run_flags.trim().to_string();
        let test_topology = params.attestation_mode == AttestationMode::Test;
        if test_topology && !flags.contains(HOST_NET) {
            if !flags.is_empty() {
                flags.push(' ');
            }
            flags.push_str(HOST_NET);
        }

        if !params.attestation_mode.required() {
            return Ok(format!(
                "$ docker run {} --device=/dev/sgx/enclave -it {}",
                flags,
                params.gsc_image()
            ));
        }

        let log = fs::read_to_string(self.root.join(params.log_file())).unwrap_or_default();
        let measurements = Measurements::from_log(&log);

        let mut verifier_envs = String::from("-e RA_TLS_ALLOW_SW_HARDENING_NEEDED=1");
        if test_topology {
            verifier_envs.push_str(" -e RA_TLS_ALLOW_OUTDATED_TCB_INSECURE=1");
        }
        if params.build_type != BuildType::Release {
            verifier_envs.push_str(" -e RA_TLS_ALLOW_DEBUG_ENCLAVE_INSECURE=1");
        }

        let ssl_dir = std::path::absolute(self.root.join(SSL_COMMON_DIR))?;
        let cert_mount = format!("-v {}:{}", ssl_dir.display(), VERIFIER_CERT_MOUNT_POINT);
        let key_mount = params
            .encryption_key_path
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| format!(" -v {}:{}", dir.display(), KEYS_MOUNT_POINT))
            .unwrap_or_default();
        let host_net = if test_topology { "--net=host " } else { "" };

        let verifier_command = format!(
            "$ docker run {host_net}--device=/dev/sgx/enclave \
             -e RA_TLS_MRENCLAVE={} -e RA_TLS_MRSIGNER={} \
             -e RA_TLS_ISV_PROD_ID={} -e RA_TLS_ISV_SVN={} \
             {verifier_envs} {cert_mount}{key_mount} -it verifier:latest",
            measurements.mr_enclave,
            measurements.mr_signer,
            measurements.isv_prod_id,
            measurements.isv_svn,
        );

        let verifier_server = if test_topology { LOOPBACK_SERVER } else { DNS_PLACEHOLDER };
        let workload_command = format!(
            "$ docker run {flags} --device=/dev/sgx/enclave \
             -e SECRET_PROVISION_SERVERS={verifier_server} \
             -v /var/run/aesmd/aesm.socket:/var/run/aesmd/aesm.socket -it {}",
            params.gsc_image()
        );

        let dns_note = if test_topology {
            ""
        } else {
            ". Assign the correct DNS information of the verifier server to the environment \
             variable SECRET_PROVISION_SERVERS"
        };

        Ok(format!(
            "Execute below command to start the verifier on a trusted system:\n\
             {verifier_command}\n\n\
             Execute below command to deploy the curated GSC image{dns_note}:\n\
             {workload_command}"
        ))
    }

    /// Run command for the non-interactive test image, including the
    /// workload's insecure default arguments.
    pub fn report_test_image<C: Console>(
        &self,
        console: &C,
        params: &CurationParameters,
        insecure_args: &str,
        run_flags: &str,
    ) -> Result<String, AppError> {
        let mut tail = params.gsc_image();
        if !insecure_args.is_empty() {
            tail.push(' ');
            tail.push_str(insecure_args);
        }
        let command = format!(
            "$ docker run --net=host --device=/dev/sgx/enclave {run_flags} -it {tail}"
        );
        fs::write(self.root.join(COMMANDS_FILE), &command)?;

        console.show_message(&format!(
            "Run the {} docker image on an SGX-enabled system with the command below. \
             Host networking (--net=host) is optional. The command is saved to {} as well.",
            params.gsc_image(),
            COMMANDS_FILE
        ));
        console.show_message(&command);
        Ok(command)
    }
}
