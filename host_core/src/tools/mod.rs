//! Tool surface - the closed set of operations the conversational agent may
//! invoke.
//!
//! The agent cannot invent operations; it can only select from this catalog.
//! Every operation returns a short acknowledgement string the agent folds
//! into its next utterance, and none of them can fail the session: bad input
//! degrades to a corrective acknowledgement, internal failures to a soft
//! inline error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use show_rules::{GameSession, Phase, ScenarioBank};

/// Sentinel returned by `get_scenario` once every round has been played.
pub const GAME_OVER: &str = "GAME_OVER";

/// Soft inline error returned when no scenario can be drawn.
const SCENARIO_UNAVAILABLE: &str =
    "Error: could not fetch a scenario. Please try again.";

/// A request from the conversational agent.
///
/// Wire shape is adjacently tagged, matching the tool-call protocol:
/// `{"name": "set_player_name", "arguments": {"name": "Ada"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolRequest {
    /// Record the player's name and start the game.
    SetPlayerName { name: String },
    /// Draw the next scenario, or learn that the show is over.
    GetScenario,
    /// Save the host's spoken reaction to the round just performed.
    RecordRoundReaction { reaction: String },
}

impl ToolRequest {
    /// Protocol name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::SetPlayerName { .. } => "set_player_name",
            ToolRequest::GetScenario => "get_scenario",
            ToolRequest::RecordRoundReaction { .. } => "record_round_reaction",
        }
    }
}

/// Describes one callable operation to the language-model layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameter: Option<ParamSpec>,
}

/// Describes the single string parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// The complete tool catalog, in announcement order.
pub const TOOL_CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "set_player_name",
        description: "Call this when the player tells you their name.",
        parameter: Some(ParamSpec {
            name: "name",
            description: "The name of the player",
        }),
    },
    ToolSpec {
        name: "get_scenario",
        description: "Get the next improv scenario. Signals GAME_OVER when the show is finished.",
        parameter: None,
    },
    ToolSpec {
        name: "record_round_reaction",
        description: "Call this after you have spoken your reaction to the player's performance.",
        parameter: Some(ParamSpec {
            name: "reaction",
            description: "Your feedback on the player's performance",
        }),
    },
];

/// The only legal mutation path into a [`GameSession`].
///
/// Owns the session and the bank; `dispatch` takes `&mut self`, so the
/// one-writer-at-a-time discipline is enforced by the borrow checker rather
/// than by locks.
#[derive(Debug)]
pub struct ToolSurface {
    session: GameSession,
    bank: ScenarioBank,
}

impl ToolSurface {
    /// Bind a session and a bank into a tool surface.
    pub fn new(session: GameSession, bank: ScenarioBank) -> Self {
        Self { session, bank }
    }

    /// Read view of the governed session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Execute one tool call and return its acknowledgement.
    pub fn dispatch(&mut self, request: ToolRequest) -> String {
        match request {
            ToolRequest::SetPlayerName { name } => self.set_player_name(&name),
            ToolRequest::GetScenario => self.get_scenario(),
            ToolRequest::RecordRoundReaction { reaction } => {
                self.record_round_reaction(&reaction)
            }
        }
    }

    fn set_player_name(&mut self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return "No name heard. Ask the player for their name again.".to_string();
        }

        self.session.start(name);
        format!("Player name set to {name}. Game started! Explain the rules and start round 1.")
    }

    fn get_scenario(&mut self) -> String {
        match self.session.next_scenario(&self.bank) {
            Some(scenario) => format!(
                "Scenario for round {} of {}: {}",
                self.session.current_round, self.session.max_rounds, scenario
            ),
            None if self.session.phase == Phase::Done => GAME_OVER.to_string(),
            None => {
                warn!(session = %self.session.id, "scenario draw failed, bank is empty");
                SCENARIO_UNAVAILABLE.to_string()
            }
        }
    }

    fn record_round_reaction(&mut self, reaction: &str) -> String {
        let reaction = reaction.trim();
        if reaction.is_empty() {
            return "Nothing to record. Deliver your reaction out loud first.".to_string();
        }

        self.session.record_reaction(reaction);
        "Reaction recorded. Move on to the next round.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_surface() -> ToolSurface {
        ToolSurface::new(GameSession::with_player("Sam"), ScenarioBank::standard())
    }

    #[test]
    fn test_set_player_name_starts_game() {
        let mut surface = ToolSurface::new(GameSession::new(), ScenarioBank::standard());

        let reply = surface.dispatch(ToolRequest::SetPlayerName {
            name: "Ada".to_string(),
        });

        assert!(reply.contains("Ada"));
        assert!(reply.contains("round 1"));
        assert_eq!(surface.session().phase, Phase::Playing);
        assert_eq!(surface.session().player_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_blank_name_does_not_mutate() {
        let mut surface = ToolSurface::new(GameSession::new(), ScenarioBank::standard());

        let reply = surface.dispatch(ToolRequest::SetPlayerName {
            name: "   ".to_string(),
        });

        assert!(reply.contains("again"));
        assert_eq!(surface.session().phase, Phase::Intro);
        assert!(surface.session().player_name.is_none());
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut surface = ToolSurface::new(GameSession::new(), ScenarioBank::standard());
        surface.dispatch(ToolRequest::SetPlayerName {
            name: "  Ada  ".to_string(),
        });
        assert_eq!(surface.session().player_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_get_scenario_tags_the_round() {
        let mut surface = playing_surface();
        let reply = surface.dispatch(ToolRequest::GetScenario);
        assert!(reply.starts_with("Scenario for round 1 of 3:"));
    }

    #[test]
    fn test_get_scenario_signals_game_over() {
        let mut surface = playing_surface();
        for _ in 0..3 {
            let reply = surface.dispatch(ToolRequest::GetScenario);
            assert_ne!(reply, GAME_OVER);
            surface.dispatch(ToolRequest::RecordRoundReaction {
                reaction: "loved it".to_string(),
            });
        }

        assert_eq!(surface.dispatch(ToolRequest::GetScenario), GAME_OVER);
        assert!(surface.session().is_done());
    }

    #[test]
    fn test_empty_bank_is_a_soft_error() {
        let mut surface = ToolSurface::new(
            GameSession::with_player("Sam"),
            ScenarioBank::new(Vec::<String>::new()),
        );

        let reply = surface.dispatch(ToolRequest::GetScenario);

        assert!(reply.starts_with("Error:"));
        assert_eq!(surface.session().phase, Phase::Playing);
        assert_eq!(surface.session().current_round, 0);
    }

    #[test]
    fn test_record_reaction_acknowledges_and_appends() {
        let mut surface = playing_surface();
        surface.dispatch(ToolRequest::GetScenario);

        let reply = surface.dispatch(ToolRequest::RecordRoundReaction {
            reaction: "bold choice of accent".to_string(),
        });

        assert!(reply.contains("next round"));
        assert_eq!(surface.session().rounds.len(), 1);
        assert_eq!(surface.session().rounds[0].reaction, "bold choice of accent");
    }

    #[test]
    fn test_record_reaction_without_scenario_is_lenient() {
        let mut surface = playing_surface();

        // Same acknowledgement, no state change: a confused agent repeating
        // itself cannot corrupt the history.
        let reply = surface.dispatch(ToolRequest::RecordRoundReaction {
            reaction: "nice".to_string(),
        });

        assert!(reply.contains("next round"));
        assert!(surface.session().rounds.is_empty());
    }

    #[test]
    fn test_blank_reaction_is_not_recorded() {
        let mut surface = playing_surface();
        surface.dispatch(ToolRequest::GetScenario);

        let reply = surface.dispatch(ToolRequest::RecordRoundReaction {
            reaction: "  ".to_string(),
        });

        assert!(reply.contains("Nothing to record"));
        assert!(surface.session().rounds.is_empty());
        assert!(surface.session().has_pending_scenario());
    }

    #[test]
    fn test_wire_shape() {
        let request: ToolRequest =
            serde_json::from_str(r#"{"name":"set_player_name","arguments":{"name":"Ada"}}"#)
                .unwrap();
        assert_eq!(
            request,
            ToolRequest::SetPlayerName {
                name: "Ada".to_string()
            }
        );

        let request: ToolRequest = serde_json::from_str(r#"{"name":"get_scenario"}"#).unwrap();
        assert_eq!(request, ToolRequest::GetScenario);

        let encoded = serde_json::to_string(&ToolRequest::RecordRoundReaction {
            reaction: "superb".to_string(),
        })
        .unwrap();
        assert!(encoded.contains("\"record_round_reaction\""));
        assert!(encoded.contains("\"superb\""));
    }

    #[test]
    fn test_catalog_matches_wire_names() {
        let wire_names = [
            ToolRequest::SetPlayerName {
                name: String::new(),
            }
            .name(),
            ToolRequest::GetScenario.name(),
            ToolRequest::RecordRoundReaction {
                reaction: String::new(),
            }
            .name(),
        ];

        assert_eq!(TOOL_CATALOG.len(), wire_names.len());
        for (tool, name) in TOOL_CATALOG.iter().zip(wire_names) {
            assert_eq!(tool.name, name);
        }
    }
}
