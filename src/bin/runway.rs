//! Command-line entry point: compare hosted models on one prompt, rerank
//! the answers, export a markdown report.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use runway::backends::Cohere;
use runway::secret_store::{
    AZURE_FOUNDRY_URI, AZURE_OPENAI_API_KEY, AZURE_OPENAI_ENDPOINT, COHERE_API_KEY,
    HUGGINGFACE_TOKEN,
};
use runway::{
    report, successful_texts, CredentialStore, Harness, PromptRequest, Reranker, ResultSet,
};
use secrecy::ExposeSecret;

#[derive(Parser)]
#[command(name = "runway", version, about = "Side-by-side comparison of hosted LLMs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one prompt to many models and show the answers side by side
    Ask {
        /// The prompt to dispatch
        prompt: String,
        /// Comma-separated model keys (defaults to every configured model)
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,
        /// Rerank the successful answers against the prompt
        #[arg(long)]
        rerank: bool,
        /// How many reranked answers to keep
        #[arg(long, default_value_t = 3)]
        top_n: usize,
        /// Write a markdown report after the run
        #[arg(long)]
        save: bool,
        /// Report path (defaults to runway_output_<timestamp>.md)
        #[arg(long, value_name = "PATH", requires = "save")]
        output: Option<PathBuf>,
        /// Override the max_tokens sampling parameter
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Override the sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// List the model catalog and which vendors have credentials
    Models,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = CredentialStore::load().context("loading credential store")?;

    match cli.command {
        Command::Ask {
            prompt,
            models,
            rerank,
            top_n,
            save,
            output,
            max_tokens,
            temperature,
        } => {
            let harness = build_harness(&store);
            let keys = if models.is_empty() {
                harness.configured_keys()
            } else {
                models
            };
            if keys.is_empty() {
                bail!(
                    "no vendors configured; set {HUGGINGFACE_TOKEN}, {AZURE_OPENAI_API_KEY} \
                     (+ {AZURE_OPENAI_ENDPOINT}), {AZURE_FOUNDRY_URI}, or {COHERE_API_KEY}"
                );
            }

            let mut request = PromptRequest::new(prompt);
            if let Some(max_tokens) = max_tokens {
                request = request.max_tokens(max_tokens);
            }
            if let Some(temperature) = temperature {
                request = request.temperature(temperature);
            }

            let results = harness.run(&request, &keys).await?;
            print_results(&results);

            if rerank {
                rerank_results(&store, &results, top_n).await?;
            }

            if save {
                let path = output.unwrap_or_else(report::default_report_path);
                report::write_markdown(&results, &path)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                println!("Saved report to {}", path.display());
            }
        }
        Command::Models => {
            let harness = build_harness(&store);
            for descriptor in harness.registry().descriptors() {
                let status = if harness.supports(descriptor.vendor) {
                    "ready"
                } else {
                    "no credentials"
                };
                println!(
                    "{:<14} {:<14} {:<44} [{status}]",
                    descriptor.key, descriptor.vendor, descriptor.model_id
                );
            }
        }
    }

    Ok(())
}

/// Configures a backend for every vendor whose credentials are present and
/// logs the ones that are skipped.
fn build_harness(store: &CredentialStore) -> Harness {
    let mut builder = Harness::builder();

    match store.get(HUGGINGFACE_TOKEN) {
        Some(token) => builder = builder.huggingface(&token),
        None => log::info!("{HUGGINGFACE_TOKEN} not set, skipping HuggingFace models"),
    }

    match (store.get(AZURE_OPENAI_API_KEY), store.get(AZURE_OPENAI_ENDPOINT)) {
        (Some(key), Some(endpoint)) => {
            builder = builder.azure_openai(&key, endpoint.expose_secret().to_string());
            // The Foundry endpoint shares the Azure key.
            if let Some(uri) = store.get(AZURE_FOUNDRY_URI) {
                builder = builder.azure_foundry(&key, uri.expose_secret().to_string());
            } else {
                log::info!("{AZURE_FOUNDRY_URI} not set, skipping Azure Foundry models");
            }
        }
        _ => log::info!(
            "{AZURE_OPENAI_API_KEY} or {AZURE_OPENAI_ENDPOINT} not set, skipping Azure models"
        ),
    }

    match store.get(COHERE_API_KEY) {
        Some(key) => builder = builder.cohere(&key),
        None => log::info!("{COHERE_API_KEY} not set, skipping Cohere models"),
    }

    builder.build()
}

fn print_results(results: &ResultSet) {
    let rule = "-".repeat(60);
    for result in results.iter() {
        let timing = result
            .elapsed
            .map(|elapsed| format!(" ({:.2}s)", elapsed.as_secs_f64()))
            .unwrap_or_default();
        match result.text() {
            Some(text) => println!("{}{timing}:\n{text}\n{rule}", result.model_key),
            None => println!(
                "{}{timing}: [failed] {}\n{rule}",
                result.model_key,
                result.failure_message().unwrap_or("unknown failure")
            ),
        }
    }
}

async fn rerank_results(
    store: &CredentialStore,
    results: &ResultSet,
    top_n: usize,
) -> anyhow::Result<()> {
    let documents = successful_texts(results);
    if documents.is_empty() {
        println!("Nothing to rerank: no model returned a successful answer.");
        return Ok(());
    }

    let key = store.require(COHERE_API_KEY)?;
    let reranker = Reranker::new(Box::new(Cohere::new(key.expose_secret().clone())));
    let ranked = reranker.rerank(results.prompt(), &documents, top_n).await?;

    println!("Top {} answers by relevance:", ranked.len());
    for (position, document) in ranked.iter().enumerate() {
        let preview: String = document.text.chars().take(120).collect();
        println!("{}. [{:.4}] {preview}", position + 1, document.score);
    }
    Ok(())
}
