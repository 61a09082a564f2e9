use std::ops::Range;

use log::trace;

use crate::{
    config::{
        COUNT_FIELD, MIN_TRACE_FIELDS, OP_FIELD, SECTORS_PER_BLOCK, SECTOR_FIELD,
        WRITE_OP_PREFIX,
    },
    disk::BLOCK_SIZE,
    error::{Error, Result},
};

/// blkparse 中的一条写记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRecord {
    pub sector: u64,  // 起始扇区（设备绝对地址）
    pub sectors: u64, // 扇区数
}

impl WriteRecord {
    /// 解析一行 trace。字段不足或不是写操作的行返回 `Ok(None)`。
    ///
    /// `line_no` 从 1 开始，只用于错误信息。
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_TRACE_FIELDS {
            trace!("line {}: {} fields, skipped", line_no, fields.len());
            return Ok(None);
        }

        let op = fields[OP_FIELD];
        if !op.starts_with(WRITE_OP_PREFIX) {
            trace!("line {}: op {:?} is not a write, skipped", line_no, op);
            return Ok(None);
        }

        let record = Self {
            sector: parse_field(line_no, "sector", fields[SECTOR_FIELD])?,
            sectors: parse_field(line_no, "sector count", fields[COUNT_FIELD])?,
        };

        // 末块的字节偏移必须能用 u64 表示
        if record.end_offset().is_none() {
            return Err(Error::InvalidTraceField {
                line: line_no,
                field: "sector",
                value: fields[SECTOR_FIELD].to_string(),
            });
        }

        Ok(Some(record))
    }

    /// 该记录覆盖的块号区间 `[block, block + count)`，按分区偏移换算。
    ///
    /// 跨过分区起点的记录只保留分区内的块；完全位于分区之前（属于别的分区）
    /// 时返回 `None`。
    pub fn blocks(&self, offset: u64) -> Option<Range<u64>> {
        let start = (i128::from(self.sector) - i128::from(offset))
            .div_euclid(i128::from(SECTORS_PER_BLOCK));
        let end = start + i128::from(self.block_count());
        if end <= 0 {
            return None;
        }
        Some(start.max(0) as u64..end as u64)
    }

    /// 是否有一部分落在分区起点之前
    pub fn starts_before(&self, offset: u64) -> bool {
        self.sector < offset
    }

    // +1 覆盖未对齐的尾部，也保证至少一个块
    fn block_count(&self) -> u64 {
        self.sectors / SECTORS_PER_BLOCK + 1
    }

    fn end_offset(&self) -> Option<u64> {
        (self.sector / SECTORS_PER_BLOCK)
            .checked_add(self.block_count())?
            .checked_mul(BLOCK_SIZE as u64)
    }
}

fn parse_field(line: usize, field: &'static str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| Error::InvalidTraceField {
        line,
        field,
        value: value.to_string(),
    })
}
