mod build_scripts;
mod console;
mod container_engine;

pub use build_scripts::BuildScripts;
pub use console::Console;
pub use container_engine::ContainerEngine;
