//! appforge's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the generation flow, and
//! coordinates interactions between the modules.

use std::fs;

use appforge::{
    catalog::Catalog,
    cli::{get_args, Args},
    collector::collect_plan,
    constants::ENV_EXAMPLE_FILE,
    envfile::{synthesize_env, OsRandomSecret},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    materializer::Materializer,
    prompt::DialoguerPrompter,
    report::{render_summary, render_template_list},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads and validates the template catalog
/// 2. Resolves a generation plan from flags and/or prompts
/// 3. Materializes the template tree into the output directory
/// 4. Synthesizes .env.example when the template declares env vars
/// 5. Prints the completion summary
fn run(args: Args) -> Result<()> {
    let catalog = Catalog::load(&args.templates_dir)?;

    if args.list {
        print!("{}", render_template_list(&catalog));
        return Ok(());
    }

    let prompter = DialoguerPrompter::new();
    let plan = match collect_plan(&catalog, &prompter, &args)? {
        Some(plan) => plan,
        None => {
            println!("Aborted, nothing was generated.");
            return Ok(());
        }
    };
    let template = catalog.get(&plan.template_id).ok_or_else(|| {
        Error::Catalog(format!("template '{}' missing from the catalog", plan.template_id))
    })?;

    let stats = Materializer::new(&args.templates_dir, &plan)?.run()?;
    log::debug!("{} files written to {}", stats.files_written, plan.output_dir.display());

    let wrote_env =
        match synthesize_env(&template.env_vars, &plan.customizations, &OsRandomSecret) {
            Some(content) => {
                fs::write(plan.output_dir.join(ENV_EXAMPLE_FILE), content)?;
                true
            }
            None => false,
        };

    print!("{}", render_summary(&plan, stats.has_manifest, wrote_env));
    Ok(())
}
