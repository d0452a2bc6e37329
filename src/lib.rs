//! gsc-curate: interactive wizard for curating Gramine Shielded Container
//! (GSC) images.
//!
//! The wizard gathers curation parameters step by step, shells out to the
//! external curation script (and the verifier build helper when remote
//! attestation is configured), confirms success by looking the produced
//! image up in the container engine, and writes the final `docker run`
//! instructions to `commands.txt`.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::env;

use app::{AppContext, commands::curate};
use services::{DialoguerConsole, DockerCli, ShellScriptRunner};

pub use app::commands::curate::CurateOptions;
pub use domain::{AppError, BuildType};

/// Run a curation in the current directory (which must contain the
/// `workloads/`, `util/`, and `verifier/` layout the build scripts expect).
pub fn curate(options: &CurateOptions) -> Result<(), AppError> {
    let root = env::current_dir()?;
    let ctx = AppContext::new(
        DialoguerConsole::new(),
        DockerCli::new(),
        ShellScriptRunner::new(root.clone()),
        root,
    );
    curate::execute(&ctx, options)
}
