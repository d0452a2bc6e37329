use crate::app::{AppContext, BuildInvoker, CurationFlow, PromptCatalog, ResultReporter};
use crate::domain::{AppError, BuildType, CurationParameters, Distro};
use crate::ports::{BuildScripts, Console, ContainerEngine};
use crate::services::WorkloadFiles;

/// Command-line surface of a curation run.
#[derive(Debug, Clone)]
pub struct CurateOptions {
    pub workload_type: String,
    pub base_image_name: String,
    /// Build an insecure test-signed image without the wizard.
    pub test: bool,
    pub build_type: BuildType,
}

/// Full curation run: acquire base image, detect its distro, gather
/// parameters (interactively or via the test fast path), build, report.
pub fn execute<C, E, B>(ctx: &AppContext<C, E, B>, options: &CurateOptions) -> Result<(), AppError>
where
    C: Console,
    E: ContainerEngine,
    B: BuildScripts,
{
    let console = ctx.console();
    let engine = ctx.engine();
    let base_image = &options.base_image_name;

    if !engine.image_exists(base_image) {
        console.show_message(&format!(
            "Warning: Cannot find application Docker image `{base_image}`. Fetching from Docker Hub ..."
        ));
        engine.pull_image(base_image)?;
    }

    let os_release = engine.read_os_release(base_image)?;
    let distro = Distro::from_os_release(&os_release)?;

    let workload = WorkloadFiles::new(ctx.root(), &options.workload_type);

    if options.test {
        return curate_test_image(ctx, options, distro, &workload);
    }

    let catalog = PromptCatalog::new(&options.workload_type, &workload);
    let flow = CurationFlow::new(console, &catalog, ctx.root());
    let params = flow.run(
        &options.workload_type,
        base_image,
        distro,
        options.build_type,
        &workload,
    )?;

    let invoker = BuildInvoker::new(engine, ctx.scripts(), ctx.root());
    invoker.invoke(console, &params)?;

    ResultReporter::new(ctx.root()).report(console, &params)?;
    Ok(())
}

fn curate_test_image<C, E, B>(
    ctx: &AppContext<C, E, B>,
    options: &CurateOptions,
    distro: Distro,
    workload: &WorkloadFiles,
) -> Result<(), AppError>
where
    C: Console,
    E: ContainerEngine,
    B: BuildScripts,
{
    let console = ctx.console();
    let mut params = CurationParameters::new(
        &options.workload_type,
        &options.base_image_name,
        options.build_type,
    );
    params.distro = distro;

    console.show_message(
        "Your test GSC image is being generated. This image is not supposed to be used in production.",
    );
    let log_file = params.log_file();
    console.show_message(&format!("You may monitor {log_file} for detailed progress."));

    ctx.scripts().run_curation(&params.test_image_args(), &ctx.root().join(&log_file))?;

    let image = params.gsc_image();
    if !ctx.engine().image_exists(&image) {
        return Err(AppError::BuildFailed { image, log_file });
    }

    let mut args = workload.insecure_args();
    let common = workload.common_args();
    if !common.is_empty() {
        if !args.is_empty() {
            args.push(' ');
        }
        args.push_str(&common);
    }

    ResultReporter::new(ctx.root()).report_test_image(
        console,
        &params,
        &args,
        &workload.docker_run_flags(),
    )?;
    Ok(())
}
