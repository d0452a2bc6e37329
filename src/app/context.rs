use std::path::{Path, PathBuf};

use crate::ports::{BuildScripts, Console, ContainerEngine};

/// Application context holding the collaborators a curation run needs.
pub struct AppContext<C: Console, E: ContainerEngine, B: BuildScripts> {
    console: C,
    engine: E,
    scripts: B,
    root: PathBuf,
}

impl<C: Console, E: ContainerEngine, B: BuildScripts> AppContext<C, E, B> {
    /// Create a new application context rooted at the curation working
    /// directory (where `workloads/`, `util/`, and `verifier/` live).
    pub fn new(console: C, engine: E, scripts: B, root: PathBuf) -> Self {
        Self { console, engine, scripts, root }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn scripts(&self) -> &B {
        &self.scripts
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
