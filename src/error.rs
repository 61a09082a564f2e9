use std::{fmt, io, path::PathBuf};

/// 回滚工具错误类型
#[derive(Debug)]
pub enum Error {
    Io(io::Error), // 底层 I/O 错误
    Open {
        path: PathBuf,
        source: io::Error,
    }, // 文件无法打开，带路径
    InvalidTraceField {
        line: usize,
        field: &'static str,
        value: String,
    }, // 写记录中的数值字段非法
    TruncatedImage {
        block: u64,
    }, // 镜像在块内结束
    BlockIo {
        block: u64,
        restored: u64,
        source: io::Error,
    }, // 恢复过程中的读写失败，带已恢复块数
    VerifyMismatch {
        block: u64,
    }, // 回读校验不一致
    Prompt(String), // 交互确认失败
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Open { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            Self::InvalidTraceField { line, field, value } => write!(
                f,
                "trace line {}: invalid {} field {:?}",
                line, field, value
            ),
            Self::TruncatedImage { block } => write!(
                f,
                "truncated source image: block {} extends past end of image",
                block
            ),
            Self::BlockIo {
                block,
                restored,
                source,
            } => write!(
                f,
                "I/O error on block {} after {} blocks restored: {}",
                block, restored, source
            ),
            Self::VerifyMismatch { block } => {
                write!(f, "verification failed: block {} differs from image", block)
            }
            Self::Prompt(msg) => write!(f, "confirmation prompt failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Open { source, .. } | Self::BlockIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
