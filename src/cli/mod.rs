pub mod output;

use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};

use crate::{
    cli::output::{confirm_restore, print_report, progress_bar},
    config::RestoreConfig,
    error::Result,
    restore::restore_blocks,
    trace::parse_trace_file,
};

/// Restore the blocks written during a benchmark run from a reference image.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// blkparse output containing only write operations (blkparse -a write ...)
    #[arg(value_name = "BLKPARSE")]
    pub blkparse: PathBuf,

    /// Start of the partition on its device, in sectors
    #[arg(value_name = "OFFSET")]
    pub offset: u64,

    /// Image that was written to the partition before the benchmark
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Device file of the partition the benchmark ran on
    #[arg(value_name = "PARTITION")]
    pub partition: PathBuf,

    /// Parse the trace and check the image, but do not write the partition
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Read back every restored block and compare it with the image
    #[arg(long)]
    pub verify: bool,

    /// Ask before writing to the partition
    #[arg(short, long)]
    pub interactive: bool,

    /// Do not show a progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn restore_config(&self) -> RestoreConfig {
        let mut config = RestoreConfig::new(&self.image, &self.partition);
        config.dry_run = self.dry_run;
        config.verify = self.verify;
        config
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let blocks = parse_trace_file(&cli.blkparse, cli.offset)?;
    let config = cli.restore_config();

    if blocks.is_empty() {
        info!("no written blocks inside the partition");
    }

    if cli.interactive && !config.dry_run && !confirm_restore(blocks.len(), &config)? {
        output::print_aborted();
        return Ok(());
    }

    let progress = progress_bar(cli.quiet);
    let report = restore_blocks(&blocks, &config, &progress)?;
    info!(
        "{} write records, {} blocks",
        blocks.write_records(),
        report.restored
    );

    print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::BLOCK_SIZE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("blk-rollback").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_positional_arguments() {
        let cli = cli(&["trace.txt", "2048", "base.img", "/dev/sdb1"]);
        assert_eq!(cli.blkparse, PathBuf::from("trace.txt"));
        assert_eq!(cli.offset, 2048);
        assert_eq!(cli.image, PathBuf::from("base.img"));
        assert_eq!(cli.partition, PathBuf::from("/dev/sdb1"));
        assert!(!cli.dry_run && !cli.verify && !cli.interactive);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn flags_and_verbosity() {
        let cli = cli(&["-n", "--verify", "-vv", "t", "0", "i", "p"]);
        let config = cli.restore_config();
        assert!(config.dry_run);
        assert!(config.verify);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn missing_argument_is_rejected() {
        let result = Cli::try_parse_from(["blk-rollback", "trace.txt", "0", "base.img"]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_offset_is_rejected() {
        let result = Cli::try_parse_from(["blk-rollback", "t", "-8", "i", "p"]);
        assert!(result.is_err());
    }

    #[test]
    fn end_to_end_overlapping_writes() {
        let trace = file_with(
            b"259,0 11 1 0.000000000 0 C W 800 + 8 [0]\n\
              259,0 11 2 0.000100000 0 C W 808 + 8 [0]\n\
              259,0 11 3 0.000200000 0 C R 900 + 8 [0]\n",
        );
        let mut image_bytes = vec![0u8; 128 * BLOCK_SIZE];
        for (i, chunk) in image_bytes.chunks_mut(BLOCK_SIZE).enumerate() {
            chunk.fill(i as u8);
        }
        let image = file_with(&image_bytes);
        let partition = file_with(&vec![0xFF; 128 * BLOCK_SIZE]);

        let cli = cli(&[
            "-q",
            trace.path().to_str().unwrap(),
            "0",
            image.path().to_str().unwrap(),
            partition.path().to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        let content = std::fs::read(partition.path()).unwrap();
        for (i, chunk) in content.chunks(BLOCK_SIZE).enumerate() {
            let expected = if (100..103).contains(&i) { i as u8 } else { 0xFF };
            assert!(chunk.iter().all(|&b| b == expected), "block {}", i);
        }
    }
}
