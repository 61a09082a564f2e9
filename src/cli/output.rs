use colored::*;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::RestoreConfig,
    error::{Error, Result},
    restore::RestoreReport,
};

/// 恢复进度条；quiet 时隐藏
pub fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} blocks {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

pub fn confirm_restore(blocks: usize, config: &RestoreConfig) -> Result<bool> {
    let prompt = format!(
        "Overwrite {} blocks of {} with data from {}?",
        blocks,
        config.partition.display(),
        config.image.display()
    );

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Prompt(e.to_string()))
}

pub fn print_report(report: &RestoreReport) {
    if report.dry_run {
        println!(
            "{} {} blocks would be replaced, partition untouched",
            "🔍 Dry run:".yellow().bold(),
            report.restored
        );
        return;
    }

    println!("total blocks replaced:  {}", report.restored);
    if report.verified {
        println!("{}", "✅ All restored blocks verified".green());
    }
}

pub fn print_aborted() {
    println!("{}", "⚠️  Aborted, nothing written.".yellow());
}

pub fn print_error(err: &Error) {
    eprintln!("{} {}", "❌ Error:".red().bold(), err);
}
