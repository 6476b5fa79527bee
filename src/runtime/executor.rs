//! Conversation loop: executes effects and feeds resulting events back into
//! the state machine until the turn responds

use super::traits::LlmClient;
use crate::conversation::{to_llm_messages, ConversationState, Turn};
use crate::intent::{IntentPolicy, Selection};
use crate::llm::{LlmError, LlmRequest, SystemContent};
use crate::state_machine::{
    transition, Effect, Event, ToolCall, ToolInput, ToolOutcome, TransitionError, TurnState,
};
use crate::weather::{BackendError, WeatherBackend};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Prefix of every failed lookup's tool-result text
pub const FETCH_APOLOGY: &str = "Sorry, I couldn't fetch the weather data";

/// Limits and sampling applied to every turn
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub engine_timeout: Duration,
    pub backend_timeout: Duration,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub history_window: usize,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            engine_timeout: Duration::from_secs(30),
            backend_timeout: Duration::from_secs(30),
            max_tokens: Some(1000),
            temperature: Some(0.7),
            history_window: 10,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("A turn is already in progress")]
    Busy,
    #[error("Turn abandoned before a reply was produced")]
    Abandoned,
    #[error(transparent)]
    Invalid(TransitionError),
}

impl From<TransitionError> for TurnError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::Busy => TurnError::Busy,
            other => TurnError::Invalid(other),
        }
    }
}

/// One session: owns its history and drives one turn at a time
pub struct ConversationLoop<L, B>
where
    L: LlmClient,
    B: WeatherBackend,
{
    policy: Arc<dyn IntentPolicy>,
    llm_client: Arc<L>,
    backend: Arc<B>,
    conversation: ConversationState,
    state: TurnState,
    settings: LoopSettings,
}

impl<L, B> ConversationLoop<L, B>
where
    L: LlmClient,
    B: WeatherBackend,
{
    pub fn new(
        policy: Arc<dyn IntentPolicy>,
        llm_client: Arc<L>,
        backend: Arc<B>,
        settings: LoopSettings,
    ) -> Self {
        let conversation = ConversationState::new(settings.history_window);
        tracing::info!(
            session_id = %conversation.session_id(),
            policy = policy.name(),
            model = llm_client.model_id(),
            window = conversation.window(),
            "Starting conversation"
        );
        Self {
            policy,
            llm_client,
            backend,
            conversation,
            state: TurnState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn history(&self) -> &[Turn] {
        self.conversation.turns()
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Run one turn to completion
    pub async fn respond(&mut self, utterance: &str) -> Result<String, TurnError> {
        self.respond_with_cancel(utterance, &CancellationToken::new())
            .await
    }

    /// Run one turn, giving up at the next suspension point once `cancel`
    /// fires. An abandoned turn keeps its user turn and nothing else.
    pub async fn respond_with_cancel(
        &mut self,
        utterance: &str,
        cancel: &CancellationToken,
    ) -> Result<String, TurnError> {
        if self.state.is_busy() {
            // A previous respond future was dropped mid-turn
            tracing::warn!(state = self.state.name(), "Discarding interrupted turn");
            self.abandon()?;
        }

        let start = Instant::now();
        let mut events = VecDeque::from([Event::UserMessage {
            text: utterance.to_string(),
        }]);

        while let Some(event) = events.pop_front() {
            let result = transition(&self.state, event)?;
            tracing::debug!(
                from = self.state.name(),
                to = result.new_state.name(),
                "Turn transition"
            );
            self.state = result.new_state;

            for effect in result.effects {
                match self.execute_effect(effect, cancel).await {
                    Ok(Some(next)) => events.push_back(next),
                    Ok(None) => {}
                    Err(TurnError::Abandoned) => {
                        self.abandon()?;
                        return Err(TurnError::Abandoned);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        match &self.state {
            TurnState::Responded { reply } => {
                tracing::info!(
                    session_id = %self.conversation.session_id(),
                    turns = self.conversation.len(),
                    duration_ms = %start.elapsed().as_millis(),
                    "Turn complete"
                );
                Ok(reply.clone())
            }
            other => Err(TurnError::Invalid(TransitionError::InvalidTransition(
                format!("Turn stopped in {} without a reply", other.name()),
            ))),
        }
    }

    fn abandon(&mut self) -> Result<(), TurnError> {
        let result = transition(&self.state, Event::Abandon)?;
        tracing::info!(
            session_id = %self.conversation.session_id(),
            state = self.state.name(),
            "Turn abandoned"
        );
        self.state = result.new_state;
        Ok(())
    }

    async fn execute_effect(
        &mut self,
        effect: Effect,
        cancel: &CancellationToken,
    ) -> Result<Option<Event>, TurnError> {
        match effect {
            Effect::AppendUserTurn { text } => {
                self.conversation.push(Turn::user(text));
                Ok(None)
            }

            Effect::Classify { utterance } => {
                let event = match self.policy.select(&utterance) {
                    Selection::Delegate => Event::DelegateToEngine,
                    Selection::Local(intent) => {
                        tracing::debug!(?intent, "Classified utterance");
                        Event::IntentResolved {
                            tool_call: intent.lookup_request().map(|request| {
                                ToolCall::new(
                                    format!("local-{}", uuid::Uuid::new_v4()),
                                    ToolInput::from(&request),
                                )
                            }),
                        }
                    }
                };
                Ok(Some(event))
            }

            Effect::RequestCompletion {
                offer_tools,
                staged,
            } => self.request_completion(offer_tools, staged, cancel).await,

            Effect::FetchWeather { call } => self.fetch_weather(call, cancel).await,

            Effect::CommitExchange { tool_turns, reply } => {
                self.conversation
                    .commit_exchange(tool_turns, Turn::assistant(reply));
                Ok(None)
            }
        }
    }

    async fn request_completion(
        &self,
        offer_tools: bool,
        staged: Vec<Turn>,
        cancel: &CancellationToken,
    ) -> Result<Option<Event>, TurnError> {
        let turns = self.conversation.window_view_with(&staged);

        let request = LlmRequest {
            system: vec![SystemContent::new(self.policy.system_prompt())],
            messages: to_llm_messages(&turns),
            tools: if offer_tools {
                self.policy.declared_tools()
            } else {
                vec![]
            },
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let limit = self.settings.engine_timeout;
        let result = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(TurnError::Abandoned),

            result = tokio::time::timeout(limit, self.llm_client.complete(&request)) => {
                result.unwrap_or_else(|_| Err(LlmError::timeout(limit)))
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(kind = e.kind.as_str(), error = %e, "Engine request failed");
                return Ok(Some(Event::EngineFailed { message: e.message }));
            }
        };

        let tool_calls = if offer_tools {
            let parsed: Result<Vec<ToolCall>, _> = response
                .tool_uses()
                .into_iter()
                .map(|(id, name, input)| {
                    ToolInput::from_name_and_value(name, input.clone())
                        .map(|input| ToolCall::new(id, input))
                })
                .collect();
            match parsed {
                Ok(calls) => calls,
                Err(e) => {
                    tracing::warn!(error = %e, "Engine issued an unusable invocation");
                    return Ok(Some(Event::EngineFailed {
                        message: e.to_string(),
                    }));
                }
            }
        } else {
            if response.has_tool_use() {
                tracing::warn!("Ignoring invocations in a completion that offered no tools");
            }
            vec![]
        };

        Ok(Some(Event::EngineResponded {
            text: response.text(),
            tool_calls,
            usage: response.usage,
        }))
    }

    async fn fetch_weather(
        &self,
        call: ToolCall,
        cancel: &CancellationToken,
    ) -> Result<Option<Event>, TurnError> {
        let outcome = match self.policy.dispatch(&call) {
            Err(e) => {
                tracing::warn!(tool = call.name(), tool_use_id = %call.id, error = %e, "Rejected lookup arguments");
                ToolOutcome::failure(format!("{FETCH_APOLOGY}: {e}"))
            }
            Ok(request) => {
                let limit = self.settings.backend_timeout;
                let start = Instant::now();
                let result = tokio::select! {
                    biased;

                    () = cancel.cancelled() => return Err(TurnError::Abandoned),

                    result = tokio::time::timeout(limit, self.backend.fetch(&request)) => {
                        result.unwrap_or_else(|_| Err(BackendError::Timeout(limit)))
                    }
                };

                match result {
                    Ok(text) => {
                        tracing::info!(
                            tool = call.name(),
                            tool_use_id = %call.id,
                            duration_ms = %start.elapsed().as_millis(),
                            "Lookup complete"
                        );
                        ToolOutcome::success(request.frame_result(&text))
                    }
                    Err(e) => {
                        tracing::warn!(tool = call.name(), tool_use_id = %call.id, error = %e, "Lookup failed");
                        ToolOutcome::failure(format!("{FETCH_APOLOGY}: {e}"))
                    }
                }
            }
        };

        Ok(Some(Event::ToolComplete {
            tool_use_id: call.id,
            outcome,
        }))
    }
}
