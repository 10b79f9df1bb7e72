pub mod fs;
pub mod memory;

pub use fs::FsReportStore;
pub use memory::MemoryReportStore;
