use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Result, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    disk::{
        block_device::BlockDevice,
        types::{block_offset, Block},
    },
    error::Error,
};

/// 以文件（镜像文件或分区设备文件）为后端的块设备
#[derive(Debug)]
pub struct FileDisk {
    file: File,
    path: PathBuf,
}

impl FileDisk {
    /// 只读打开，用于参考镜像
    pub fn open_read_only(path: &Path) -> crate::error::Result<Self> {
        Self::open(path, OpenOptions::new().read(true))
    }

    /// 只写打开，用于目标分区；不创建、不截断
    pub fn open_write_only(path: &Path) -> crate::error::Result<Self> {
        Self::open(path, OpenOptions::new().write(true))
    }

    /// 读写打开，用于写后校验
    pub fn open_read_write(path: &Path) -> crate::error::Result<Self> {
        Self::open(path, OpenOptions::new().read(true).write(true))
    }

    fn open(path: &Path, options: &OpenOptions) -> crate::error::Result<Self> {
        let file = options.open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened {}", path.display());

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn seek_block(&mut self, block_id: u64) -> Result<()> {
        let pos = block_offset(block_id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("block {} is past the addressable range", block_id),
            )
        })?;
        self.file.seek(SeekFrom::Start(pos))?;
        Ok(())
    }
}

impl BlockDevice for FileDisk {
    fn read_block(&mut self, block_id: u64, buf: &mut Block) -> Result<()> {
        self.seek_block(block_id)?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&mut self, block_id: u64, buf: &Block) -> Result<()> {
        self.seek_block(block_id)?;
        self.file.write_all(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}
