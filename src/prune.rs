//! `prune`: the delete-by-date workflow driven from the terminal.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use colored::Colorize;
use rc_core::events::ConsoleEvent;
use rc_core::retention::{ConfirmationState, DismissSignal};
use rc_shell::commands::delete_by_date;
use rc_shell::events::TopicEvent;
use rc_shell::AppRuntime;
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::{ask, exit_code, output};

const GATE_SLACK: Duration = Duration::from_secs(5);

pub async fn run(
    runtime: &AppRuntime,
    repository: &str,
    days: &str,
    yes: bool,
) -> anyhow::Result<ExitCode> {
    let mut events = runtime.bus().subscribe();

    delete_by_date::open_delete_by_date(runtime, repository).await?;
    delete_by_date::set_threshold(runtime, days).await;
    let summary = delete_by_date::preview_deletion(runtime).await?;

    if summary.count == 0 {
        println!(
            "No images in {repository} were last pulled more than {} days ago",
            summary.threshold_days
        );
        return Ok(ExitCode::SUCCESS);
    }
    output::print_summary(&summary);

    delete_by_date::request_confirmation(runtime).await?;
    let timings = runtime.settings().timings;
    wait_for_gate(
        runtime,
        &mut events,
        ConfirmationState::Open,
        timings.opening_guard + GATE_SLACK,
    )
    .await?;

    println!();
    println!("{}", summary.disclosure.yellow());
    let confirmed = yes
        || ask(format!(
            "Permanently delete {} images ({}) from {repository}?",
            summary.count, summary.total_size
        ))
        .await?;

    if !confirmed {
        delete_by_date::dismiss_confirmation(runtime, DismissSignal::CancelButton).await;
        println!("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = delete_by_date::confirm_deletion(runtime).await?;
    output::print_outcome(&outcome);
    wait_for_gate(
        runtime,
        &mut events,
        ConfirmationState::Closed,
        timings.outcome_display + GATE_SLACK,
    )
    .await?;

    Ok(exit_code(outcome.status))
}

async fn wait_for_gate(
    runtime: &AppRuntime,
    events: &mut Receiver<TopicEvent>,
    target: ConfirmationState,
    within: Duration,
) -> anyhow::Result<()> {
    let wait = async {
        loop {
            match events.recv().await {
                Ok(TopicEvent {
                    payload: ConsoleEvent::GateChanged { to, .. },
                    ..
                }) if to == target => return Ok(()),
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => {
                    if delete_by_date::workflow_snapshot(runtime).await.confirmation == target {
                        return Ok(());
                    }
                }
                Err(RecvError::Closed) => bail!("event bus closed"),
            }
        }
    };
    tokio::time::timeout(within, wait)
        .await
        .with_context(|| format!("confirmation dialog did not reach {target}"))?
}
