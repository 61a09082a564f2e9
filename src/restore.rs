use std::io::ErrorKind;

use indicatif::ProgressBar;
use log::{debug, info};

use crate::{
    config::RestoreConfig,
    disk::{Block, BlockDevice, FileDisk, BLOCK_SIZE},
    error::{Error, Result},
    trace::BlockSet,
};

/// 恢复结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: u64, // 已恢复（dry run 时为将要恢复）的块数
    pub verified: bool,
    pub dry_run: bool,
}

/// 把 `blocks` 中的每一块从参考镜像拷回分区。
///
/// dry run 时只检查镜像中每一块都可读，不打开分区。
pub fn restore_blocks(
    blocks: &BlockSet,
    config: &RestoreConfig,
    progress: &ProgressBar,
) -> Result<RestoreReport> {
    let mut image = FileDisk::open_read_only(&config.image)?;

    if config.dry_run {
        let checked = check_blocks(blocks, &mut image, progress)?;
        info!(
            "dry run: {} blocks would be restored from {}",
            checked,
            image.path().display()
        );
        return Ok(RestoreReport {
            restored: checked,
            verified: false,
            dry_run: true,
        });
    }

    let mut partition = if config.verify {
        FileDisk::open_read_write(&config.partition)?
    } else {
        FileDisk::open_write_only(&config.partition)?
    };

    info!(
        "restoring {} blocks from {} to {}",
        blocks.len(),
        image.path().display(),
        partition.path().display()
    );
    let restored = copy_blocks(blocks, &mut image, &mut partition, config.verify, progress)?;
    info!("restored {} blocks", restored);

    Ok(RestoreReport {
        restored,
        verified: config.verify,
        dry_run: false,
    })
}

/// 逐块拷贝，返回拷贝的块数。`verify` 为真时每块写完回读比对。
pub fn copy_blocks<S, D>(
    blocks: &BlockSet,
    source: &mut S,
    dest: &mut D,
    verify: bool,
    progress: &ProgressBar,
) -> Result<u64>
where
    S: BlockDevice,
    D: BlockDevice,
{
    let mut buf: Block = [0; BLOCK_SIZE];
    let mut readback: Block = [0; BLOCK_SIZE];
    let mut restored = 0u64;

    progress.set_length(blocks.len() as u64);

    for block in blocks.iter() {
        read_source(source, block, &mut buf, restored)?;

        dest.write_block(block, &buf)
            .map_err(|e| block_io(e, block, restored))?;

        if verify {
            dest.read_block(block, &mut readback)
                .map_err(|e| block_io(e, block, restored))?;
            if readback != buf {
                return Err(Error::VerifyMismatch { block });
            }
        }

        restored += 1;
        debug!("block {} restored", block);
        progress.inc(1);
    }

    dest.flush()?;
    progress.finish();

    Ok(restored)
}

fn check_blocks<S: BlockDevice>(
    blocks: &BlockSet,
    source: &mut S,
    progress: &ProgressBar,
) -> Result<u64> {
    let mut buf: Block = [0; BLOCK_SIZE];
    let mut checked = 0u64;

    progress.set_length(blocks.len() as u64);
    for block in blocks.iter() {
        read_source(source, block, &mut buf, 0)?;
        checked += 1;
        progress.inc(1);
    }
    progress.finish();

    Ok(checked)
}

fn read_source<S: BlockDevice>(
    source: &mut S,
    block: u64,
    buf: &mut Block,
    restored: u64,
) -> Result<()> {
    source.read_block(block, buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::TruncatedImage { block },
        _ => block_io(e, block, restored),
    })
}

fn block_io(source: std::io::Error, block: u64, restored: u64) -> Error {
    Error::BlockIo {
        block,
        restored,
        source,
    }
}
