//! Session orchestration - wiring one game session to the speech pipeline.
//!
//! The orchestrator makes no game-logic decisions. It builds the session,
//! tries to pre-seed the player's name from connection metadata, picks the
//! matching opening line, hands a host to the pipeline, and accounts usage
//! until the session closes.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

use show_rules::{GameSession, ScenarioBank};

use crate::host::ConversationalHost;
use crate::telemetry::{UsageCollector, UsageMetrics, UsageSummary};

/// Opening line when the player's name is unknown.
const GREETING_ASK_NAME: &str =
    "Welcome to Improv Battle! I'm your host. What's your name, contestant?";

/// Errors surfaced by the speech-pipeline boundary.
///
/// These are the only errors in the crate that can end a session, and they
/// all originate outside the game core.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("speech pipeline failed to start: {0}")]
    PipelineStart(String),

    #[error("speech pipeline failed to speak: {0}")]
    Speak(String),
}

/// Events emitted by the speech pipeline while a session runs.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The pipeline collected a batch of usage metrics.
    MetricsCollected(UsageMetrics),
    /// The session ended: the player left, asked to stop, or the show
    /// finished.
    Closed,
}

/// A connected participant as reported by the transport layer.
#[derive(Debug, Clone)]
pub struct ParticipantInfo {
    pub identity: String,
    /// Raw JSON metadata attached at connection time, if any.
    pub metadata: Option<String>,
}

impl ParticipantInfo {
    pub fn new(identity: impl Into<String>, metadata: Option<String>) -> Self {
        Self {
            identity: identity.into(),
            metadata,
        }
    }
}

/// Recognized fields of participant metadata.
#[derive(Debug, Deserialize)]
struct ParticipantMetadata {
    #[serde(default)]
    player_name: Option<String>,
}

/// The external speech stack: transcription, synthesis, turn handling, and
/// the governing language model, behind one seam.
///
/// `start` hands over the host and returns the event stream; `say` speaks an
/// utterance to the player, used once for the opening line.
#[async_trait]
pub trait SpeechPipeline {
    async fn start(
        &mut self,
        host: ConversationalHost,
    ) -> Result<Receiver<PipelineEvent>, SessionError>;

    async fn say(&mut self, utterance: &str) -> Result<(), SessionError>;
}

/// Runs one session from connection to teardown.
pub struct SessionOrchestrator<P> {
    pipeline: P,
    bank: ScenarioBank,
    usage: UsageCollector,
}

impl<P: SpeechPipeline> SessionOrchestrator<P> {
    /// Bind a pipeline and a scenario bank for one session.
    pub fn new(pipeline: P, bank: ScenarioBank) -> Self {
        Self {
            pipeline,
            bank,
            usage: UsageCollector::new(),
        }
    }

    /// Run the session to completion and return the usage summary.
    pub async fn run(
        self,
        participants: &[ParticipantInfo],
    ) -> Result<UsageSummary, SessionError> {
        let Self {
            mut pipeline,
            bank,
            mut usage,
        } = self;

        let mut session = GameSession::new();
        let greeting = match preseed_player_name(participants) {
            Some(name) => {
                session.start(name.as_str());
                format!(
                    "Welcome to Improv Battle, {name}! I'm your host. Are you ready to improvise?"
                )
            }
            None => GREETING_ASK_NAME.to_string(),
        };

        info!(session = %session.id, "starting session");
        let host = ConversationalHost::new(session, bank);
        let mut events = pipeline.start(host).await?;
        pipeline.say(&greeting).await?;

        while let Some(event) = events.recv().await {
            match event {
                PipelineEvent::MetricsCollected(metrics) => {
                    debug!(?metrics, "metrics collected");
                    usage.collect(&metrics);
                }
                PipelineEvent::Closed => break,
            }
        }

        let summary = usage.summary();
        info!(%summary, "session finished");
        Ok(summary)
    }
}

/// Extract a player name from the first participant whose metadata carries
/// one.
///
/// Malformed metadata is logged and skipped; this never fails session start.
fn preseed_player_name(participants: &[ParticipantInfo]) -> Option<String> {
    for participant in participants {
        let Some(raw) = participant.metadata.as_deref() else {
            continue;
        };

        match serde_json::from_str::<ParticipantMetadata>(raw) {
            Ok(metadata) => {
                if let Some(name) = metadata.player_name {
                    let name = name.trim();
                    if !name.is_empty() {
                        return Some(name.to_string());
                    }
                }
            }
            Err(err) => {
                warn!(
                    identity = %participant.identity,
                    %err,
                    "ignoring malformed participant metadata"
                );
            }
        }
    }

    None
}
