//! Shared testing utilities for gsc-curate CLI tests.
//!
//! Builds an isolated curation working directory with the layout the wizard
//! expects (`workloads/`, `util/`, `verifier/`), a fake `docker` binary on
//! `PATH`, and stub build scripts. The fake engine keeps its image registry
//! as marker files under a state directory, so the stub curation script can
//! "produce" images by touching markers.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const UBUNTU_OS_RELEASE: &str = "NAME=\"Ubuntu\"\nID=ubuntu\nVERSION_ID=\"18.04\"\n";

const FAKE_DOCKER: &str = r#"#!/bin/sh
state="$FAKE_DOCKER_STATE"
case "$1" in
  image)
    # image inspect NAME
    name=$(printf '%s' "$3" | tr ':/' '__')
    [ -f "$state/images/$name" ]
    exit $?
    ;;
  pull)
    name=$(printf '%s' "$2" | tr ':/' '__')
    if [ -f "$state/no-pull" ]; then
      echo "pull access denied" >&2
      exit 1
    fi
    touch "$state/images/$name"
    ;;
  run)
    # run --rm --entrypoint cat IMAGE /etc/os-release
    cat "$state/os-release"
    ;;
esac
"#;

// Simulates a successful curation: records its argument list and registers
// the expected output image.
const CURATION_SCRIPT_OK: &str = r#"#!/bin/sh
echo "curation args: $@"
name=$(printf '%s' "$2" | tr ':/' '__')
touch "$FAKE_DOCKER_STATE/images/gsc-$name"
echo 'mr_enclave = "ABCD1234"'
echo 'mr_signer = "FFEE0011"'
"#;

// Simulates a build whose pipeline "succeeds" (exit 0) without producing an
// image; the image lookup must catch this.
const CURATION_SCRIPT_NO_IMAGE: &str = "#!/bin/sh\necho silently broken\nexit 0\n";

#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    state_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create an isolated curation directory for the given workload with a
    /// pullable base image and a succeeding curation script.
    pub fn new(workload_type: &str, base_image: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let state_dir = root.path().join("state");
        let bin_dir = root.path().join("bin");

        fs::create_dir_all(work_dir.join("workloads").join(workload_type)).unwrap();
        fs::create_dir_all(work_dir.join("util")).unwrap();
        fs::create_dir_all(work_dir.join("verifier")).unwrap();
        fs::create_dir_all(state_dir.join("images")).unwrap();
        fs::create_dir_all(&bin_dir).unwrap();

        fs::write(state_dir.join("os-release"), UBUNTU_OS_RELEASE).unwrap();

        let ctx = Self { root, work_dir, state_dir, bin_dir };
        ctx.write_executable(&ctx.bin_dir.join("docker"), FAKE_DOCKER);
        ctx.write_executable(&ctx.work_dir.join("util/curation_script.sh"), CURATION_SCRIPT_OK);
        ctx.register_image(base_image);
        ctx
    }

    fn write_executable(&self, path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Mark an image as present in the fake engine.
    pub fn register_image(&self, name: &str) {
        let marker = name.replace([':', '/'], "_");
        fs::write(self.state_dir.join("images").join(marker), "").unwrap();
    }

    pub fn image_exists(&self, name: &str) -> bool {
        let marker = name.replace([':', '/'], "_");
        self.state_dir.join("images").join(marker).exists()
    }

    /// Replace the curation script with one that exits 0 without producing
    /// an image.
    pub fn break_curation_script(&self) {
        self.write_executable(
            &self.work_dir.join("util/curation_script.sh"),
            CURATION_SCRIPT_NO_IMAGE,
        );
    }

    /// Make the fake engine reject pulls.
    pub fn deny_pulls(&self) {
        fs::write(self.state_dir.join("no-pull"), "").unwrap();
    }

    /// Override the os-release served for distro detection.
    pub fn set_os_release(&self, contents: &str) {
        fs::write(self.state_dir.join("os-release"), contents).unwrap();
    }

    /// Write a per-workload auxiliary file.
    pub fn write_workload_file(&self, workload_type: &str, name: &str, contents: &str) {
        fs::write(
            self.work_dir.join("workloads").join(workload_type).join(name),
            contents,
        )
        .unwrap();
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn commands_file(&self) -> PathBuf {
        self.work_dir.join("commands.txt")
    }

    pub fn log_file(&self, workload_type: &str, base_image: &str) -> PathBuf {
        let sanitized = base_image.replace([':', '/'], "_");
        self.work_dir.join("workloads").join(workload_type).join(format!("{sanitized}.log"))
    }

    /// Build a command for invoking the compiled binary inside the work
    /// directory, with the fake docker on PATH.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("gsc-curate").expect("Failed to locate gsc-curate binary");
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.current_dir(&self.work_dir)
            .env("PATH", format!("{}:{}", self.bin_dir.display(), path))
            .env("FAKE_DOCKER_STATE", &self.state_dir);
        cmd
    }
}
