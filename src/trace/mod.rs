pub mod record;

use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufRead, BufReader},
    ops::Range,
    path::Path,
};

use log::{info, warn};

use crate::{
    error::{Error, Result},
    trace::record::WriteRecord,
};

/// 被写过的块号集合（去重、升序）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockSet {
    blocks: BTreeSet<u64>,
    write_records: u64, // 贡献了块的写记录条数
}

impl BlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_range(&mut self, range: Range<u64>) {
        self.blocks.extend(range);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn write_records(&self) -> u64 {
        self.write_records
    }

    /// 升序遍历，恢复时顺序访问磁盘
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.blocks.iter().copied()
    }
}

impl FromIterator<u64> for BlockSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
            write_records: 0,
        }
    }
}

/// 从 blkparse 输出中收集被写过的块号。
///
/// `offset` 是分区在设备上的起始扇区。
pub fn parse_trace<R: BufRead>(reader: R, offset: u64) -> Result<BlockSet> {
    let mut set = BlockSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;

        let Some(record) = WriteRecord::parse(line_no, &line)? else {
            continue;
        };

        match record.blocks(offset) {
            Some(range) => {
                if record.starts_before(offset) {
                    warn!(
                        "line {}: sector {} starts before partition offset {}, clipped to blocks {:?}",
                        line_no, record.sector, offset, range
                    );
                }
                set.insert_range(range);
                set.write_records += 1;
            }
            None => warn!(
                "line {}: sector {} is before partition offset {}, skipped",
                line_no, record.sector, offset
            ),
        }
    }

    Ok(set)
}

pub fn parse_trace_file(path: &Path, offset: u64) -> Result<BlockSet> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse_trace(BufReader::new(file), offset)?;
    info!(
        "parsed {}: {} write records, {} distinct blocks",
        path.display(),
        set.write_records(),
        set.len()
    );
    Ok(set)
}
