pub mod chat;
pub mod corpus;
pub mod report;
pub mod scheduler;

pub use chat::ChatAgent;
pub use corpus::{build_corpus, DEFAULT_MAX_CORPUS_CHARS};
pub use report::{extract_report_fields, Extraction, ReportGenerator, DEFAULT_FALLBACK_SUMMARY_CHARS};
pub use scheduler::{run_report_cycle, CycleOutcome, Scheduler, SchedulerState};

pub mod prelude {
    pub use super::chat::ChatAgent;
    pub use super::report::ReportGenerator;
    pub use super::scheduler::{run_report_cycle, CycleOutcome, Scheduler};
    pub use nr_core::{Article, ChatModel, Report, ReportStorage, Result};
}
