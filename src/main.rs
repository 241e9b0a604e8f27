mod cli;
mod output;
mod prune;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use rc_app::ConsoleSettings;
use rc_core::retention::DeletionStatus;
use rc_core::ImageRanking;
use rc_shell::bootstrap::{self, tracing::init_tracing_subscriber};
use rc_shell::commands::{images, repositories};
use rc_shell::AppRuntime;

use cli::{Cli, Command, Rank};

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = bootstrap::resolve_config(cli.config.as_deref())?;
    bootstrap::apply_env_overrides(&mut config);
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let settings = ConsoleSettings::from_config(&config);
    init_tracing_subscriber(&settings).context("Failed to initialize tracing")?;

    let runtime = bootstrap::create_runtime(settings)?;
    tracing::debug!(api = %runtime.settings().api_base_url, "Console runtime ready");

    match cli.command {
        Command::Repos { filter } => {
            let repos = repositories::list_repositories(&runtime, filter.as_deref()).await?;
            output::print_repositories(&repos);
        }
        Command::Stats { limit } => {
            let stats = repositories::get_global_stats(&runtime, Some(&limit)).await?;
            output::print_stats(&stats);
        }
        Command::Dashboard { repository } => {
            let dashboard = repositories::get_repository_dashboard(&runtime, &repository).await?;
            output::print_dashboard(&dashboard);
        }
        Command::Images {
            repository,
            rank,
            limit,
        } => {
            let ranking = match rank {
                Rank::Downloads => ImageRanking::MostDownloaded,
                Rank::Size => ImageRanking::Largest,
            };
            let rows = images::list_images(&runtime, &repository, ranking, limit).await?;
            output::print_images(&rows);
        }
        Command::Delete {
            repository,
            digest,
            yes,
        } => return delete_one(&runtime, &repository, &digest, yes).await,
        Command::Prune {
            repository,
            days,
            yes,
        } => return prune::run(&runtime, &repository, &days, yes).await,
    }

    Ok(ExitCode::SUCCESS)
}

async fn delete_one(
    runtime: &AppRuntime,
    repository: &str,
    digest: &str,
    yes: bool,
) -> anyhow::Result<ExitCode> {
    if !yes {
        let prompt = format!("Delete image {digest} from {repository}? This cannot be undone");
        if !ask(prompt).await? {
            println!("Cancelled");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let outcome = images::delete_image(runtime, repository, digest).await?;
    output::print_outcome(&outcome);
    Ok(exit_code(outcome.status))
}

/// Blocking yes/no prompt, default no.
pub(crate) async fn ask(prompt: String) -> anyhow::Result<bool> {
    let answer = tokio::task::spawn_blocking(move || {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
    })
    .await
    .context("Prompt task failed")??;
    Ok(answer)
}

pub(crate) fn exit_code(status: DeletionStatus) -> ExitCode {
    match status {
        DeletionStatus::Full => ExitCode::SUCCESS,
        DeletionStatus::Partial => ExitCode::from(2),
        DeletionStatus::Failed => ExitCode::FAILURE,
    }
}
