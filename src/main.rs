use anyhow::Context;
use clap::Parser;
use repo_showcase::core::ConfigProvider;
use repo_showcase::domain::model::ProjectCategory;
use repo_showcase::utils::error::ErrorSeverity;
use repo_showcase::utils::{logger, validation::Validate};
use repo_showcase::{
    CategoryFilter, CliArgs, GitHubSource, LocalStorage, ShowcaseEngine, ShowcaseError,
    ShowcasePipeline, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if args.list_categories {
        println!("{:<12} {}", "all", "All Projects");
        for category in ProjectCategory::ALL {
            println!("{:<12} {}", category.id(), category.label());
        }
        return Ok(());
    }

    tracing::info!("Starting repo-showcase");

    let Some(filter) = CategoryFilter::parse(&args.category) else {
        eprintln!("❌ Unknown category '{}'", args.category);
        eprintln!("💡 Run with --list-categories to see the valid ids");
        std::process::exit(1);
    };

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    let source = GitHubSource::builder(config.api_base())
        .user_agent(config.source.user_agent.clone())
        .timeout(config.timeout())
        .build()
        .context("failed to build HTTP client")?;

    if args.dry_run {
        perform_dry_run(&config, &source);
        return Ok(());
    }

    let catalog = match config.project_catalog() {
        Ok(catalog) => catalog,
        Err(e) => exit_with(&e),
    };
    let priority = match config.priority_table() {
        Ok(priority) => priority,
        Err(e) => exit_with(&e),
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ShowcasePipeline::new(storage, config, source)
        .with_catalog(catalog)
        .with_priority(priority)
        .with_filter(filter);
    let engine = ShowcaseEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Showcase generated");
            println!("✅ Showcase generated");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Showcase run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            if e.severity() > ErrorSeverity::Low {
                exit_with(&e);
            }
        }
    }

    Ok(())
}

fn exit_with(e: &ShowcaseError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn perform_dry_run(config: &TomlConfig, source: &GitHubSource) {
    tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
    println!("Request:  GET {}", source.repos_url(config.user(), config.per_page()));
    println!("Limit:    {}", config.limit());
    println!("Output:   {} ({})", config.output_path(), config.output_formats().join(", "));
    let base = if config.catalog.builtin { "built-in" } else { "empty" };
    match &config.catalog.path {
        Some(path) => println!("Catalog:  {} + {}", base, path),
        None => println!("Catalog:  {}", base),
    }
    println!(
        "Priority: {} explicit entries (unranked = {})",
        config.ranking.priority.len(),
        repo_showcase::UNRANKED
    );
}
