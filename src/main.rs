use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use postguard::config::Config;
use postguard::moderation::traits::FoulLanguageClassifier;

/// Postguard: sentence-level foul language moderation for blog posts.
///
/// Runs the blog post API, the classification service it calls, and the
/// retry sweep that re-checks posts whose verdict is still unknown.
#[derive(Parser)]
#[command(name = "postguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the blog post API
    Serve {
        /// Port to listen on (default: 8000)
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Run the classification service
    Classifier {
        /// Port to listen on (default: 8001)
        #[arg(long, default_value = "8001")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Re-check every post whose verdict is still unknown
    Retry {
        /// Posts to evaluate in parallel (default: POSTGUARD_RETRY_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Show a stored post
    Show {
        /// Post id
        id: i64,
    },

    /// Show system status (database, classifier, verdict counts)
    Status,

    /// Split text into sentences and classify each one
    Check {
        /// The paragraph to check
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("postguard=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Postguard database...");
            let store = postguard::db::initialize_store(&config.db_path)?;
            let table_count = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext: start the classifier with `postguard classifier`");
            println!("  and the API with `postguard serve`.");
        }

        Commands::Serve { port, bind } => {
            config.require_classifier()?;
            let store = postguard::db::initialize_store(&config.db_path)?;
            let classifier = create_classifier(&config)?;

            let state = postguard::web::AppState {
                store,
                classifier,
                retry_concurrency: config.retry_concurrency,
            };
            postguard::web::run_server(state, port, &bind).await?;
        }

        Commands::Classifier { port, bind } => {
            let model = postguard::classifier::model::WordListModel::new(&config.foul_words);
            info!(words = model.len(), "Loaded word list model");
            if model.is_empty() {
                println!(
                    "{} word list is empty, every fragment will be classified clean",
                    "Warning:".yellow()
                );
            }
            postguard::classifier::service::run_server(model, port, &bind).await?;
        }

        Commands::Retry { concurrency } => {
            config.require_classifier()?;
            let store = postguard::db::open_store(&config.db_path)?;
            let classifier = create_classifier(&config)?;
            let concurrency = concurrency.unwrap_or(config.retry_concurrency).max(1);

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} Re-checking unknown posts ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(120));

            let summary = postguard::pipeline::retry::retry_unchecked(
                store.as_ref(),
                classifier.as_ref(),
                concurrency,
            )
            .await;
            pb.finish_and_clear();

            postguard::output::terminal::display_retry_summary(&summary?);
        }

        Commands::Show { id } => {
            let store = postguard::db::open_store(&config.db_path)?;
            match store.get_post(id).await? {
                Some(post) => postguard::output::terminal::display_post(&post),
                None => anyhow::bail!("No post with id {id}"),
            }
        }

        Commands::Status => {
            if !postguard::status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `postguard init` to set up the database.");
                return Ok(());
            }
            let store = postguard::db::open_store(&config.db_path)?;
            postguard::status::show(&store, &config).await?;
        }

        Commands::Check { text } => {
            config.require_classifier()?;
            let classifier = create_classifier(&config)?;

            let sentences = postguard::moderation::segment::segment(&text);
            let mut checks = Vec::with_capacity(sentences.len());
            for sentence in sentences {
                let result = classifier.classify(&sentence).await;
                checks.push((sentence, result));
            }

            let overall =
                postguard::moderation::orchestrator::reduce(checks.iter().map(|(_, r)| *r));
            postguard::output::terminal::display_sentence_checks(&checks, overall);
        }
    }

    Ok(())
}

/// Create the HTTP classifier from configuration.
fn create_classifier(config: &Config) -> Result<Arc<dyn FoulLanguageClassifier>> {
    info!(
        url = %config.classifier_url,
        timeout_ms = config.classifier_timeout.as_millis() as u64,
        "Using HTTP classifier"
    );
    let classifier = postguard::moderation::client::HttpClassifier::new(
        &config.classifier_url,
        config.classifier_timeout,
    )?;
    Ok(Arc::new(classifier))
}
