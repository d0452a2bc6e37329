use crate::domain::AppError;

/// Narrow interface over the local container engine.
pub trait ContainerEngine {
    /// Whether `name` resolves to an image in the local registry.
    ///
    /// This lookup is the system's only build-success signal; external build
    /// scripts' exit codes are not trusted.
    fn image_exists(&self, name: &str) -> bool;

    /// Pull `name` from the remote registry.
    fn pull_image(&self, name: &str) -> Result<(), AppError>;

    /// Run `image` ephemerally and return the contents of its
    /// `/etc/os-release`, for distro detection.
    fn read_os_release(&self, image: &str) -> Result<String, AppError>;
}
