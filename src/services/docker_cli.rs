use std::process::Command;

use crate::domain::AppError;
use crate::ports::ContainerEngine;

/// Container-engine adapter backed by the `docker` CLI.
#[derive(Debug, Clone, Default)]
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new("docker").args(args).output().map_err(|e| AppError::Engine {
            command: format!("docker {}", args.join(" ")),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Engine {
                command: format!("docker {}", args.join(" ")),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ContainerEngine for DockerCli {
    fn image_exists(&self, name: &str) -> bool {
        self.run(&["image", "inspect", name]).is_ok()
    }

    fn pull_image(&self, name: &str) -> Result<(), AppError> {
        self.run(&["pull", name]).map(|_| ()).map_err(|_| AppError::ImageFetch(name.to_string()))
    }

    fn read_os_release(&self, image: &str) -> Result<String, AppError> {
        self.run(&["run", "--rm", "--entrypoint", "cat", image, "/etc/os-release"])
    }
}
