use std::fs;
use std::path::PathBuf;

/// Per-workload auxiliary files that seed prompt examples and default
/// arguments. A missing file yields an empty string; absence is never an
/// error.
#[derive(Debug, Clone)]
pub struct WorkloadFiles {
    dir: PathBuf,
}

impl WorkloadFiles {
    pub fn new(root: &std::path::Path, workload_type: &str) -> Self {
        Self { dir: root.join("workloads").join(workload_type) }
    }

    fn contents(&self, name: &str) -> String {
        fs::read_to_string(self.dir.join(name)).unwrap_or_default().trim().to_string()
    }

    /// First non-comment line of `insecure_args.txt`.
    pub fn insecure_args(&self) -> String {
        fs::read_to_string(self.dir.join("insecure_args.txt"))
            .unwrap_or_default()
            .lines()
            .find(|line| !line.starts_with('#'))
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Arguments appended to whatever the user types at the args step.
    pub fn common_args(&self) -> String {
        self.contents("common_args.txt")
    }

    pub fn env_vars(&self) -> String {
        self.contents("env_vars.txt")
    }

    pub fn docker_run_flags(&self) -> String {
        self.contents("docker_run_flags.txt")
    }

    pub fn encrypted_files(&self) -> String {
        self.contents("encrypted_files.txt")
    }
}
