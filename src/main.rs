//! Console entry point for the screening assistant.
//!
//! A minimal read-eval loop around the screening core: load configuration,
//! start a session, forward candidate lines, print assistant replies. All
//! decision logic lives in the library.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use talent_scout::adapters::{GroqConfig, GroqProvider};
use talent_scout::config::AppConfig;
use talent_scout::domain::screening::{TurnError, TurnProcessor, TurnProcessorConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Configuration error: {}", err);
        return ExitCode::FAILURE;
    }

    let api_key = config.ai.groq_api_key.clone().unwrap_or_default();
    let provider = GroqProvider::new(
        GroqConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    );
    let processor = TurnProcessor::with_config(
        Arc::new(provider),
        TurnProcessorConfig {
            history_window: config.ai.history_window,
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        },
    );

    let mut session = processor.start_session();
    if let Some(opening) = session.last_assistant_message() {
        println!("assistant> {}\n", opening.content());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !session.is_ended() {
        print!("you> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match processor.submit_turn(&mut session, &line).await {
            Ok(reply) => println!("assistant> {}\n", reply),
            Err(TurnError::Completion(err)) => {
                eprintln!(
                    "The assistant is unavailable right now ({}). Please try again.",
                    err
                );
            }
            Err(TurnError::SessionEnded) => break,
            Err(err) => eprintln!("{}", err),
        }
    }

    println!("Session {} ended.", session.id());
    ExitCode::SUCCESS
}
