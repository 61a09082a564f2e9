/// 每个逻辑块（Block）的大小：4KB
/// 回滚以“块”为最小读写单位。
pub const BLOCK_SIZE: usize = 4096;

/// 定义一个逻辑块类型（每块 4KB 的字节数组）
/// 镜像与分区之间的所有拷贝都以 Block 为单位进行。
pub type Block = [u8; BLOCK_SIZE];

/// 块号对应的字节偏移；超出 u64 时返回 `None`
pub fn block_offset(block_id: u64) -> Option<u64> {
    block_id.checked_mul(BLOCK_SIZE as u64)
}
