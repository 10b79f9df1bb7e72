use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;

use nr_agent::{run_report_cycle, ChatAgent, ReportGenerator, Scheduler};
use nr_agent::scheduler::DEFAULT_CYCLE_INTERVAL;
use nr_core::{ChatModel, ReportStorage, Result};
use nr_feed::{NewsCollector, RssFeedSource};
use nr_storage::FsReportStore;

const DEFAULT_FEED_URL: &str = "https://feeds.bbci.co.uk/news/technology/rss.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run a single report generation
    Report,
    /// Chat about the most recently persisted report
    Chat,
    /// Run report generation every hour
    Hourly,
    /// Generate one report, then start chat
    Demo,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Grounded news report agent", long_about = None)]
struct Cli {
    /// Topic keyword to monitor
    #[arg(long, env = "TOPIC", default_value = "AI")]
    topic: String,

    #[arg(long, value_enum, default_value_t = Mode::Demo)]
    mode: Mode,

    /// Maximum number of articles to use per report
    #[arg(long, default_value_t = 5)]
    max_articles: usize,

    /// Chat model name
    #[arg(long, env = "OLLAMA_MODEL", default_value = "llama3")]
    model: String,

    /// Chat model base URL override
    #[arg(long)]
    model_url: Option<String>,

    /// RSS feed to monitor
    #[arg(long, env = "FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Source label recorded on each collected article
    #[arg(long, default_value = "bbc_technology")]
    source_name: String,

    /// Directory holding the report artifact pairs
    #[arg(long, default_value = "reports")]
    reports_dir: PathBuf,
}

async fn chat_about_latest(
    model: Arc<dyn ChatModel>,
    storage: &dyn ReportStorage,
) -> Result<()> {
    let Some(report) = storage.load_latest().await? else {
        println!("No reports found. Run with --mode report first.");
        return Ok(());
    };

    let mut agent = ChatAgent::new(model, &report);
    agent.run_chat_loop().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let model = nr_inference::create_model(nr_inference::Config {
        model_name: Some(cli.model.clone()),
        base_url: cli.model_url.clone(),
    })?;
    info!("🧠 Model client initialized (using {})", model.name());

    let storage: Arc<dyn ReportStorage> = Arc::new(FsReportStore::new(&cli.reports_dir));
    let collector = NewsCollector::new(
        Box::new(RssFeedSource::new(&cli.feed_url)),
        &cli.source_name,
    );
    let generator = ReportGenerator::new(model.clone(), storage.clone());

    match cli.mode {
        Mode::Report => {
            run_report_cycle(&collector, &generator, &cli.topic, cli.max_articles).await?;
        }
        Mode::Chat => {
            chat_about_latest(model, storage.as_ref()).await?;
        }
        Mode::Hourly => {
            let mut scheduler = Scheduler::new(DEFAULT_CYCLE_INTERVAL);
            scheduler
                .run(&collector, &generator, &cli.topic, cli.max_articles)
                .await?;
        }
        Mode::Demo => {
            run_report_cycle(&collector, &generator, &cli.topic, cli.max_articles).await?;
            chat_about_latest(model, storage.as_ref()).await?;
        }
    }

    Ok(())
}
