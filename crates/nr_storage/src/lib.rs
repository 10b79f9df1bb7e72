pub mod backends;
pub mod markdown;

pub use backends::{FsReportStore, MemoryReportStore};
pub use markdown::render_markdown;

pub mod prelude {
    pub use super::backends::*;
    pub use nr_core::{Report, ReportStorage, SavedReport};
}
