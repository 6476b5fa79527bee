//! Interactive read-eval-print surface

use crate::runtime::{ConversationLoop, LlmClient, TurnError};
use crate::weather::WeatherBackend;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const EXIT_COMMANDS: &[&str] = &["quit", "exit", "bye", "q"];

pub const BANNER: &str = "Smart Weather AI Agent Ready!
Ask me about weather anywhere in the US - I'll figure out the details!
Examples: 'Weather in downtown Seattle', 'Any storms in Florida?', 'How's the weather?'
Type 'quit' to exit.
";

const PROMPT: &str = "You: ";

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_COMMANDS.iter().any(|c| c.eq_ignore_ascii_case(line))
}

/// Trimmed utterance, or None for a blank line
pub fn normalize_input(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Drive `agent` from `reader` until an exit command or end of input
pub async fn run<L, B, R, W>(
    agent: &mut ConversationLoop<L, B>,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    L: LlmClient,
    B: WeatherBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(BANNER.as_bytes()).await?;

    let mut line = String::new();
    loop {
        writer.write_all(format!("\n{PROMPT}").as_bytes()).await?;
        writer.flush().await?;

        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            writer.write_all(b"\nGoodbye!\n").await?;
            break;
        }

        let Some(utterance) = normalize_input(&line) else {
            continue;
        };
        if is_exit_command(utterance) {
            writer.write_all(b"Goodbye!\n").await?;
            break;
        }

        writer.write_all(b"Thinking...\n").await?;
        writer.flush().await?;

        let reply = match agent.respond(utterance).await {
            Ok(reply) => reply,
            Err(TurnError::Abandoned) => continue,
            Err(e) => {
                tracing::error!(error = %e, "Turn failed");
                format!("Error: {e}")
            }
        };
        writer
            .write_all(format!("Assistant: {reply}\n").as_bytes())
            .await?;
    }

    writer.flush().await
}
