use clap::Parser;
use clap::Subcommand;
use foliorag::config::AppConfig;
use foliorag::rag::PortfolioEngine;
use foliorag::Result;

#[derive(Parser)]
#[command(name = "foliorag")]
#[command(about = "Portfolio Q&A engine combining retrieval with LLM generation")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a config file (defaults to config.toml / config.example.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question about the portfolio (full pipeline)
    Ask {
        /// The question to ask
        question: String,
    },
    /// Retrieval only: show the top-scoring documents for a query
    Search {
        /// The search query
        query: String,
        /// Maximum number of documents to return
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    /// Print the built document corpus
    Docs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    foliorag::logging::init_logging_with_level(level)?;

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    let engine = PortfolioEngine::new(&config).await?;

    match cli.command {
        Commands::Ask { question } => {
            let response = engine.query(&question).await?;
            println!("{}", response.response);

            if let Some(structured) = &response.structured_data {
                println!("\n[{}]", structured.kind);
                println!("{}", serde_json::to_string_pretty(&structured.data)?);
            }

            if !response.sources.is_empty() {
                println!("\nSources:");
                for source in &response.sources {
                    println!("  - {}", source.doc_type.as_str());
                }
            }
        }
        Commands::Search { query, limit } => {
            let results = engine.search(&query, limit).await?;
            for (idx, result) in results.iter().enumerate() {
                println!(
                    "{}. [{}] (score: {:.4})",
                    idx + 1,
                    result.document.doc_type.as_str(),
                    result.score
                );
                for line in result.document.content.lines() {
                    println!("   {line}");
                }
                println!();
            }
        }
        Commands::Docs => {
            for (idx, doc) in engine.documents().iter().enumerate() {
                println!("--- Document {} [{}] ---", idx, doc.doc_type.as_str());
                println!("{}\n", doc.content);
            }
        }
    }

    Ok(())
}
