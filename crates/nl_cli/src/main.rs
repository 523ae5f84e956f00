use clap::Parser;
use nl_core::{Query, SortOrder, SourceMode};
use nl_feed::config::{DEFAULT_FEED_URL, DEFAULT_PAGE_SIZE};
use nl_feed::logging::{init_logging, LogTarget};
use nl_feed::{ArticleStore, FeedConfig, LocalSample, RemoteFeed};
use nl_view::ViewController;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod browse;
mod list;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search, sort and page through space news", long_about = None)]
pub struct Cli {
    /// Start with the remote feed instead of the bundled sample
    #[arg(long)]
    remote: bool,
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,
    /// Number of items requested from the remote feed
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    limit: u32,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Commands {
    /// Print one page of articles
    List {
        /// Case-insensitive text matched against title and summary
        #[arg(long, default_value = "")]
        search: String,
        /// One of date-desc, date-asc, title-asc, title-desc
        #[arg(long, default_value = "date-desc")]
        sort: SortOrder,
        /// Exact news site name; all sources when omitted
        #[arg(long)]
        source: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Print the distinct sources of the loaded articles
    Sources,
    /// Interactive browser (default)
    Browse {
        /// Write logs here; they are discarded otherwise
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .clone()
        .unwrap_or(Commands::Browse { log_file: None });

    let target = match &command {
        Commands::Browse { log_file: Some(path) } => LogTarget::File(path),
        Commands::Browse { log_file: None } => LogTarget::Discard,
        _ => LogTarget::Stderr,
    };
    init_logging(target, cli.verbose)?;

    let config = FeedConfig::new(&cli.feed_url, cli.limit)?;
    let mode = if cli.remote { SourceMode::Remote } else { SourceMode::Local };
    info!("📡 Starting in {} mode (feed: {})", mode.label(), config.request_url());

    let store = ArticleStore::new(Arc::new(LocalSample::new()), Arc::new(RemoteFeed::new(config)))
        .with_mode(mode);
    let mut view = ViewController::new(store);

    match command {
        Commands::List { search, sort, source, page } => {
            view.load().await;
            view.set_query(Query::new(search, sort, source.unwrap_or_default()));
            view.go_to_page(page);
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(list::render_page(&view).as_bytes())?;
        }
        Commands::Sources => {
            view.load().await;
            match view.empty_state() {
                Some(state) => eprintln!("{}", state.message()),
                None => {
                    for source in view.sources() {
                        println!("{}", source);
                    }
                }
            }
        }
        Commands::Browse { .. } => browse::run(view).await?,
    }

    Ok(())
}
