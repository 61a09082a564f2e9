pub mod block_device;
pub mod file_disk;
pub mod types;

#[cfg(test)]
pub mod mem_disk;

pub use block_device::BlockDevice;
pub use file_disk::FileDisk;
pub use types::{Block, BLOCK_SIZE};

#[cfg(test)]
pub use mem_disk::MemDisk;
