//! Per-session usage accounting.
//!
//! A best-effort side channel: the orchestrator owns one collector per
//! session, feeds it every metrics event the speech pipeline emits, and
//! flushes the summary once at teardown. Nothing here participates in game
//! correctness, and nothing in the rules crate can reach it.

use serde::{Deserialize, Serialize};

/// Usage reported by the speech pipeline for one metrics event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UsageMetrics {
    pub llm_prompt_tokens: u64,
    pub llm_completion_tokens: u64,
    pub tts_characters: u64,
    pub stt_audio_seconds: f64,
}

/// Accumulates usage metrics over a session's lifetime.
#[derive(Debug, Clone, Default)]
pub struct UsageCollector {
    totals: UsageMetrics,
    events: u64,
}

impl UsageCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one metrics event into the running totals.
    pub fn collect(&mut self, metrics: &UsageMetrics) {
        self.totals.llm_prompt_tokens += metrics.llm_prompt_tokens;
        self.totals.llm_completion_tokens += metrics.llm_completion_tokens;
        self.totals.tts_characters += metrics.tts_characters;
        self.totals.stt_audio_seconds += metrics.stt_audio_seconds;
        self.events += 1;
    }

    /// Number of events folded in so far.
    pub fn events_collected(&self) -> u64 {
        self.events
    }

    /// Snapshot the totals for reporting.
    pub fn summary(&self) -> UsageSummary {
        UsageSummary {
            llm_prompt_tokens: self.totals.llm_prompt_tokens,
            llm_completion_tokens: self.totals.llm_completion_tokens,
            tts_characters: self.totals.tts_characters,
            stt_audio_seconds: self.totals.stt_audio_seconds,
            events_collected: self.events,
        }
    }
}

/// Aggregate usage for one finished session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub llm_prompt_tokens: u64,
    pub llm_completion_tokens: u64,
    pub tts_characters: u64,
    pub stt_audio_seconds: f64,
    pub events_collected: u64,
}

impl std::fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "llm tokens: {} prompt / {} completion, tts characters: {}, stt audio: {:.1}s ({} metric events)",
            self.llm_prompt_tokens,
            self.llm_completion_tokens,
            self.tts_characters,
            self.stt_audio_seconds,
            self.events_collected
        )
    }
}
