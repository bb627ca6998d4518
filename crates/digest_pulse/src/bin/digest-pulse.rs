use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use digest_pulse::{
    openai::{ChatClient, ModelConfig},
    tracing::init_tracing_subscriber,
    DigestProcessorBuilder, DocumentSource, FileLoader, SummaryStrategy, UrlLoader,
    WikipediaSource,
};

#[derive(Parser)]
#[command(
    name = "digest-pulse",
    about = "Summarize web pages and documents with a chat completions model"
)]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ModelArgs {
    /// API key for the chat completions endpoint
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "LLM_BASE_URL", default_value = ModelConfig::DEFAULT_BASE_URL)]
    base_url: String,

    /// Model name
    #[arg(long, env = "LLM_MODEL", default_value = ModelConfig::DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, env = "LLM_TEMPERATURE", default_value = "0.7")]
    temperature: f32,

    /// Maximum tokens per completion
    #[arg(long, env = "LLM_MAX_TOKENS")]
    max_tokens: Option<u32>,

    /// Retries for transient HTTP failures
    #[arg(long, env = "LLM_MAX_RETRIES", default_value = "3")]
    max_retries: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a web page, a local text file or Wikipedia search results
    #[command(group(ArgGroup::new("input").required(true).args(["url", "file", "wiki"])))]
    Summarize {
        /// Web page to summarize
        #[arg(long)]
        url: Option<String>,

        /// Local text file to summarize
        #[arg(long)]
        file: Option<PathBuf>,

        /// Wikipedia search query whose top pages are summarized
        #[arg(long)]
        wiki: Option<String>,

        /// Summarization strategy
        #[arg(long, value_enum, default_value_t = SummaryStrategy::Refine)]
        strategy: SummaryStrategy,

        /// Maximum characters per chunk
        #[arg(long, default_value = "2000")]
        chunk_size: usize,

        /// Characters shared between consecutive chunks
        #[arg(long, default_value = "200")]
        chunk_overlap: usize,
    },
    /// Ask a single question
    Ask {
        /// The question to answer
        question: String,
    },
}

impl From<ModelArgs> for ModelConfig {
    fn from(args: ModelArgs) -> Self {
        let mut config = ModelConfig::new(args.api_key)
            .with_base_url(args.base_url)
            .with_model(args.model);
        config.temperature = args.temperature;
        config.max_tokens = args.max_tokens;
        config.max_retries = args.max_retries;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let client = ChatClient::new(cli.model.into());

    match cli.command {
        Command::Summarize {
            url,
            file,
            wiki,
            strategy,
            chunk_size,
            chunk_overlap,
        } => {
            let (source, source_id): (Box<dyn DocumentSource + Send + Sync>, String) =
                match (url, file, wiki) {
                    (Some(url), _, _) => (Box::new(UrlLoader::default()), url),
                    (None, Some(file), _) => (Box::new(FileLoader), file.display().to_string()),
                    (None, None, Some(query)) => (Box::new(WikipediaSource::default()), query),
                    (None, None, None) => anyhow::bail!("one of --url, --file or --wiki is required"),
                };

            let processor = DigestProcessorBuilder::new()
                .source(source)
                .summarizer(client)
                .strategy(strategy)
                .with_chunking(chunk_size, chunk_overlap)
                .build()?;

            tracing::info!(%source_id, %strategy, "Summarizing document");
            let summary = processor
                .run(&source_id)
                .await
                .with_context(|| format!("Failed to summarize {source_id}"))?;

            println!("{summary}");
        }
        Command::Ask { question } => {
            let answer = client
                .ask(&question)
                .await
                .context("Failed to answer question")?;

            println!("{answer}");
        }
    }

    Ok(())
}
