//! Weather chat agent
//!
//! A terminal conversation loop that answers US weather questions by
//! combining a reasoning engine with National Weather Service lookups.

mod config;
mod conversation;
mod gazetteer;
mod intent;
mod llm;
mod lookup;
mod repl;
mod runtime;
mod state_machine;
mod system_prompt;
mod weather;

use config::AgentConfig;
use gazetteer::{Gazetteer, LocationResolver};
use llm::{LoggingService, OpenAIService};
use runtime::{ProductionLoop, ServiceLlmClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use weather::NwsClient;

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weather_agent=warn".into());

    // stdout belongs to the conversation
    let fmt_layer = if std::env::var("WEATHER_AGENT_LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AgentConfig::from_env()?;

    let gazetteer = Arc::new(Gazetteer::us_default()?);
    tracing::info!(
        places = gazetteer.place_count(),
        regions = gazetteer.region_count(),
        "Gazetteer loaded"
    );
    let policy = config
        .strategy
        .into_policy(LocationResolver::new(gazetteer));

    let service = OpenAIService::new(
        config.api_key.clone(),
        config.model.clone(),
        config.base_url.clone(),
        config.settings.engine_timeout,
    )?;
    let llm_client = ServiceLlmClient::new(Arc::new(LoggingService::new(Arc::new(service))));
    let backend = NwsClient::new(
        &config.user_agent,
        config.weather_base_url.clone(),
        config.settings.backend_timeout,
    )?;

    let mut agent = ProductionLoop::new(
        policy,
        Arc::new(llm_client),
        Arc::new(backend),
        config.settings.clone(),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = repl::run(&mut agent, stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("\nGoodbye!");
        }
    }

    let conversation = agent.conversation();
    tracing::info!(
        session_id = %conversation.session_id(),
        started_at = %conversation.started_at(),
        turns = conversation.len(),
        "Session ended"
    );

    Ok(())
}
