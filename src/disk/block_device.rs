use std::io::Result;

use crate::disk::types::Block;

pub trait BlockDevice {
    /// 读取整块；设备在块内结束时返回 `UnexpectedEof`
    fn read_block(&mut self, block_id: u64, buf: &mut Block) -> Result<()>;
    fn write_block(&mut self, block_id: u64, buf: &Block) -> Result<()>;
    /// 把已写入的数据刷到稳定存储
    fn flush(&mut self) -> Result<()>;
}
