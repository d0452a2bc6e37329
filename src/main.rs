use clap::Parser;
use gsc_curate::{AppError, BuildType, CurateOptions};

#[derive(Parser)]
#[command(name = "gsc-curate")]
#[command(version)]
#[command(about = "Curate a Gramine Shielded Container (GSC) image", long_about = None)]
struct Cli {
    /// Type of workload, e.g. redis or pytorch; must match a directory under workloads/
    workload_type: String,
    /// Name of the base image to be graminized
    base_image_name: String,
    /// Generate an insecure image with a test enclave signing key
    #[arg(short, long)]
    test: bool,
    /// Compile Gramine in release, debug or debugoptimized mode
    #[arg(short, long, default_value = "release", value_parser = ["release", "debug", "debugoptimized"])]
    buildtype: String,
}

fn main() {
    // Usage errors exit 1, same as build failures; help/version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let options = CurateOptions {
        workload_type: cli.workload_type,
        base_image_name: cli.base_image_name,
        test: cli.test,
        build_type: cli.buildtype.parse::<BuildType>().unwrap_or_default(),
    };

    let result: Result<(), AppError> = gsc_curate::curate(&options);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
