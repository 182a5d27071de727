//! Neuroquery CLI entry point.

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use neuroquery::{
    seed_demo_data, ApiExtractor, AskOutcome, Config, MemoryStore, QueryAssistant, Schema,
};

/// Neuroquery: ask plain-English questions about the lab dataset
#[derive(Parser, Debug)]
#[command(name = "neuroquery")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer one question and exit
    Ask {
        /// The question to answer
        question: String,
    },
    /// Interactive question loop (default)
    Repl,
    /// Print the loaded schema
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // A broken schema source aborts startup; there is no partial service.
    let schema = match config.schema_path() {
        Some(path) => Arc::new(Schema::from_file(path)?),
        None => Arc::new(Schema::builtin()),
    };
    tracing::info!(
        models = ?schema.model_names().collect::<Vec<_>>(),
        "schema loaded"
    );

    let extractor = Arc::new(ApiExtractor::from_config(&config.extractor, schema.clone())?);
    let store = Arc::new(MemoryStore::new());
    seed_demo_data(&store).await;

    let assistant = QueryAssistant::new(schema.clone(), extractor, store, config.extractor.two_pass);

    match args.command {
        Some(Command::Ask { question }) => {
            report(&assistant.ask_report(&question).await)?;
        }
        Some(Command::Schema) => {
            println!("{}", serde_json::to_string_pretty(schema.as_ref())?);
        }
        Some(Command::Repl) | None => {
            run_repl(&assistant).await?;
        }
    }

    Ok(())
}

/// Interactive loop. One bad question is reported and the loop continues.
async fn run_repl(assistant: &QueryAssistant) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "\nAsk > ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "quit" | "exit") {
            break;
        }

        report(&assistant.ask_report(question).await)?;
    }

    Ok(())
}

fn report(outcome: &AskOutcome) -> anyhow::Result<()> {
    match outcome {
        AskOutcome::Rows(rows) => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        AskOutcome::ExtractionFailed(message)
        | AskOutcome::Invalid(message)
        | AskOutcome::Failed(message) => {
            eprintln!("{message}");
        }
    }
    Ok(())
}
