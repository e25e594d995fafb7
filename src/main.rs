use anyhow::{Result, bail};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use alfred_cli::{Alfred, display_banner, print_help, read_input};
use alfred_core::ToolRegistry;
use alfred_openai::OpenAIClient;
use alfred_rag::{
    DEFAULT_HUB_DATASET, DEFAULT_SPLIT, GuestInfoRetrieverTool, RetrieverConfig, corpus,
    dataset_source, load_records_or_empty,
};

#[derive(Parser)]
#[command(name = "alfred")]
#[command(about = "Alfred, your gala assistant: ask about any guest", long_about = None)]
struct Cli {
    /// Ask Alfred a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Run the guest lookup tool directly, without the LLM
    #[arg(short, long)]
    lookup: Option<String>,

    /// Guest dataset: a .json/.jsonl file or a Hugging Face dataset id
    #[arg(long, env = "ALFRED_DATASET", default_value = DEFAULT_HUB_DATASET)]
    dataset: String,

    /// Dataset split to load from the hub
    #[arg(long, env = "ALFRED_DATASET_SPLIT", default_value = DEFAULT_SPLIT)]
    split: String,

    /// Maximum number of guest records returned per lookup
    #[arg(short = 'k', long, default_value_t = 3)]
    top_k: usize,

    /// Override the chat model
    #[arg(long)]
    model: Option<String>,

    /// Ask the demo question and exit
    #[arg(long, conflicts_with = "question")]
    demo: bool,
}

const DEMO_QUESTION: &str = "Who is Ada Lovelace?";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("alfred=info,alfred_rag=info,alfred_openai=info,alfred_cli=info,warn")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    if cli.top_k == 0 {
        bail!("--top-k must be at least 1");
    }

    // Load guests and build the retrieval tool
    let source = dataset_source(&cli.dataset, &cli.split)?;
    let records = load_records_or_empty(source.as_ref()).await;
    let retriever = Arc::new(GuestInfoRetrieverTool::from_corpus(
        corpus::build(&records),
        RetrieverConfig { top_k: cli.top_k },
    )?);
    println!("✅ Indexed {} guests from {}", records.len(), source.describe());

    if let Some(query) = cli.lookup {
        println!("{}", retriever.retrieve(&query)?);
        return Ok(());
    }

    let tools = ToolRegistry::new().with_tool(retriever.clone());
    let alfred = match OpenAIClient::from_env() {
        Ok(client) => {
            let client = match cli.model {
                Some(model) => client.with_model(model),
                None => client,
            };
            Some(Alfred::new(client, tools))
        }
        Err(e) => {
            warn!(error = %e, "LLM unavailable");
            println!("⚠️  LLM unavailable: {}. Only direct lookups will work.", e);
            None
        }
    };

    let question = cli.question.or_else(|| cli.demo.then(|| DEMO_QUESTION.to_string()));
    if let Some(question) = question {
        let Some(alfred) = alfred else {
            bail!("cannot answer questions without an LLM; set OPENAI_API_KEY or use --lookup");
        };
        println!("{}", alfred.run(&question).await?);
        return Ok(());
    }

    // Interactive mode
    display_banner();

    loop {
        let Some(input) = read_input("🎩 >")? else {
            break;
        };

        if input.is_empty() {
            continue;
        }

        let input_lower = input.to_lowercase();

        if input_lower == "exit" || input_lower == "quit" {
            println!("{}", "👋 Good night!".green());
            break;
        }

        if input_lower == "help" {
            print_help();
            continue;
        }

        if let Some(query) = input.strip_prefix("lookup ") {
            match retriever.retrieve(query.trim()) {
                Ok(text) => println!("{}", text),
                Err(e) => println!("{} Lookup failed: {}", "❌".red(), e),
            }
            continue;
        }

        let Some(alfred) = alfred.as_ref() else {
            println!(
                "{} No LLM configured. Use 'lookup <query>' instead.",
                "⚠️".yellow()
            );
            continue;
        };

        println!("{} Thinking...", "🤖".blue());
        match alfred.run(&input).await {
            Ok(answer) => println!("{} {}", "Alfred:".bold(), answer),
            Err(e) => println!("{} {}", "❌".red(), e),
        }
    }

    Ok(())
}
