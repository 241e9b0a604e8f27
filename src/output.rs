//! Terminal rendering of command DTOs.

use colored::Colorize;
use rc_app::usecases::ConfirmationSummary;
use rc_core::events::NotificationVariant;
use rc_shell::commands::dto::{DashboardDto, DeletionOutcomeDto, GlobalStatsDto, ImageRowDto};

pub fn print_repositories(repos: &[String]) {
    if repos.is_empty() {
        println!("No repositories found");
        return;
    }
    for repo in repos {
        println!("{repo}");
    }
}

pub fn print_stats(stats: &GlobalStatsDto) {
    println!(
        "{} repositories, {} images, {} total",
        stats.total_repositories, stats.total_images, stats.total_size
    );
    println!();
    println!("{:>4}  {:<48} {:>8} {:>12}", "#", "REPOSITORY", "IMAGES", "SIZE");
    for (i, repo) in stats.repositories.iter().enumerate() {
        println!(
            "{:>4}  {:<48} {:>8} {:>12}",
            i + 1,
            repo.name,
            repo.image_count,
            repo.size
        );
    }
}

pub fn print_images(rows: &[ImageRowDto]) {
    if rows.is_empty() {
        println!("No images found");
        return;
    }
    println!(
        "{:<24} {:<24} {:>12}  {:<16} {}",
        "TAG", "DIGEST", "SIZE", "LAST PULL", "PUSHED"
    );
    for row in rows {
        let tag = format!("{:<24}", row.tag);
        let tag = if row.untagged {
            tag.dimmed().to_string()
        } else {
            tag
        };
        println!(
            "{} {:<24} {:>12}  {:<16} {}",
            tag, row.digest_short, row.size, row.last_pull, row.pushed_at
        );
    }
}

pub fn print_dashboard(dashboard: &DashboardDto) {
    println!(
        "{}  {} images, {}",
        dashboard.repository.bold(),
        dashboard.image_count,
        dashboard.total_size
    );
    println!();
    println!("{}", "Most downloaded".underline());
    print_images(&dashboard.most_downloaded);
    println!();
    println!("{}", "Largest".underline());
    print_images(&dashboard.largest);
}

pub fn print_summary(summary: &ConfirmationSummary) {
    println!(
        "{} images in {} not pulled in the last {} days ({})",
        summary.count, summary.repository, summary.threshold_days, summary.total_size
    );
    println!();
    println!(
        "{:>4}  {:<24} {:<28} {:>12}  {}",
        "#", "TAG", "DIGEST", "SIZE", "LAST PULL"
    );
    for row in &summary.rows {
        println!(
            "{:>4}  {:<24} {:<28} {:>12}  {}",
            row.index, row.tag, row.digest_short, row.size, row.last_pull
        );
    }
}

pub fn print_outcome(outcome: &DeletionOutcomeDto) {
    let title = match outcome.notice.variant {
        NotificationVariant::Success => outcome.notice.title.green().bold(),
        NotificationVariant::Warning => outcome.notice.title.yellow().bold(),
        NotificationVariant::Error => outcome.notice.title.red().bold(),
        NotificationVariant::Info => outcome.notice.title.bold(),
    };
    println!("{title}");
    println!("{}", outcome.notice.description);
}
