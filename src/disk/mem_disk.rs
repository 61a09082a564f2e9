use std::io::{Error, ErrorKind, Result};

use crate::disk::{
    block_device::BlockDevice,
    types::{Block, BLOCK_SIZE},
};

/// 内存块设备，测试用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemDisk {
    pub bytes: Vec<u8>,
    pub writes: Vec<u64>, // 按顺序记录写过的块号
}

impl MemDisk {
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
            writes: Vec::new(),
        }
    }

    /// 第 i 块内容全部填充为 i 的低 8 位
    pub fn patterned(blocks: usize) -> Self {
        let mut bytes = vec![0; blocks * BLOCK_SIZE];
        for (i, chunk) in bytes.chunks_mut(BLOCK_SIZE).enumerate() {
            chunk.fill(i as u8);
        }
        Self {
            bytes,
            writes: Vec::new(),
        }
    }

    pub fn block(&self, block_id: u64) -> &[u8] {
        let start = block_id as usize * BLOCK_SIZE;
        &self.bytes[start..start + BLOCK_SIZE]
    }
}

impl BlockDevice for MemDisk {
    fn read_block(&mut self, block_id: u64, buf: &mut Block) -> Result<()> {
        let start = block_id as usize * BLOCK_SIZE;
        match self.bytes.get(start..start + BLOCK_SIZE) {
            Some(src) => {
                buf.copy_from_slice(src);
                Ok(())
            }
            None => Err(Error::new(ErrorKind::UnexpectedEof, "block past end")),
        }
    }

    fn write_block(&mut self, block_id: u64, buf: &Block) -> Result<()> {
        let start = block_id as usize * BLOCK_SIZE;
        match self.bytes.get_mut(start..start + BLOCK_SIZE) {
            Some(dst) => {
                dst.copy_from_slice(buf);
                self.writes.push(block_id);
                Ok(())
            }
            None => Err(Error::new(ErrorKind::WriteZero, "block past end")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
