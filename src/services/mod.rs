mod dialoguer_console;
mod docker_cli;
mod script_runner;
mod workload_files;

pub use dialoguer_console::DialoguerConsole;
pub use docker_cli::DockerCli;
pub use script_runner::ShellScriptRunner;
pub use workload_files::WorkloadFiles;
