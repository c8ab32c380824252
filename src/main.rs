use anyhow::Context;
use async_params_fix::utils::error::ErrorSeverity;
use async_params_fix::utils::{logger, validation::Validate};
use async_params_fix::{CliConfig, LocalFileStore, PatchError, PatchOptions, Patcher};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("🔧 Fixing async params in API routes...");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let profile = match config.load_profile() {
        Ok(profile) => profile,
        Err(e) => fail(&e),
    };
    if let Err(e) = profile.validate() {
        fail(&e);
    }
    tracing::info!("📋 Profile: {}", profile.migration.name);

    let files = config
        .resolve_files(&profile)
        .with_context(|| format!("resolving files under {}", config.root))?;

    let rewrites = profile
        .build_rewrites()
        .context("building rewrites from profile")?;
    let options = PatchOptions {
        dry_run: config.dry_run,
        keep_going: config.keep_going,
    };
    let patcher = Patcher::with_options(LocalFileStore::new(&config.root), rewrites, options);

    match patcher.run(&files) {
        Ok(summary) => {
            if summary.failed() > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &PatchError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
