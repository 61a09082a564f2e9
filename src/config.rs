use std::path::PathBuf;

// 8 个扇区（512B）组成一个 4KB 块
pub const SECTORS_PER_BLOCK: u64 = 8;

// 少于 10 个字段的 trace 行直接忽略
pub const MIN_TRACE_FIELDS: usize = 10;

// blkparse 输出中用到的字段下标
pub const OP_FIELD: usize = 6;
pub const SECTOR_FIELD: usize = 7;
pub const COUNT_FIELD: usize = 9;

// 写操作类型以 'W' 开头（W、WS、WM、WFS ...）
pub const WRITE_OP_PREFIX: char = 'W';

/// 恢复阶段的显式配置
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    pub image: PathBuf,     // 参考镜像
    pub partition: PathBuf, // 目标分区
    pub dry_run: bool,      // 只统计不写入
    pub verify: bool,       // 写后回读校验
}

impl RestoreConfig {
    pub fn new(image: impl Into<PathBuf>, partition: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            partition: partition.into(),
            dry_run: false,
            verify: false,
        }
    }
}
