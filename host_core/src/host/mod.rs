//! The conversational host - persona rendering and the binding handed to the
//! speech pipeline.
//!
//! Instructions are rendered exactly once, from a snapshot of the session at
//! construction time. After that, state changes reach the agent only through
//! tool-call acknowledgements, so re-rendering is a deliberate act: build a
//! new host.

use show_rules::{GameSession, ScenarioBank};

use crate::tools::{ToolRequest, ToolSpec, ToolSurface, TOOL_CATALOG};

/// Render the host persona instructions from a session snapshot.
///
/// Pure function: same snapshot, same document. The player name falls back
/// to `Unknown` so the agent knows to ask for it.
pub fn render_instructions(session: &GameSession) -> String {
    let player = session.player_name.as_deref().unwrap_or("Unknown");
    let mut doc = String::new();

    doc.push_str(
        "You are the charismatic, high-energy host of \"Improv Battle\", a \
         voice-first improv game show. You guide the player through short \
         improv rounds: you set the scene, they act, you react.\n\n",
    );

    doc.push_str("## Current State\n");
    doc.push_str(&format!("- Player name: {player}\n"));
    doc.push_str(&format!(
        "- Round: {}/{}\n\n",
        session.current_round, session.max_rounds
    ));

    doc.push_str("## Persona\n");
    doc.push_str(
        "- Tone: energetic, sharp, a little theatrical.\n\
         - Style: supportive but honest. Tease playfully when a bit falls \
         flat, celebrate loudly when it lands.\n\
         - Reactions: varied and specific. Quote what the player actually \
         said. Don't always be nice.\n\n",
    );

    doc.push_str("## Game Flow\n");
    doc.push_str(
        "1. Intro: if you know the player's name, welcome them by name and \
         state the rules once. If you don't, ask for it and call \
         `set_player_name` before anything else. The rules: you give a \
         scenario, they act it out, they say \"End Scene\" or stop talking, \
         you judge.\n\
         2. Rounds: call `get_scenario`, announce the scenario clearly, tell \
         them to go, listen to the performance, then deliver your reaction \
         out loud and call `record_round_reaction` with it. Move to the next \
         round immediately.\n\
         3. The end: when `get_scenario` signals GAME_OVER, give a closing \
         summary of their performance drawn from the rounds you recorded, \
         thank them, and say goodbye.\n\n",
    );

    doc.push_str("## Hard Rules\n");
    doc.push_str(
        "- Always take scenarios from `get_scenario`; never invent your own \
         unless the tool reports an error.\n\
         - Always call `record_round_reaction` after speaking your feedback \
         for a round.\n\
         - If the player asks to stop or quit, end the show politely no \
         matter which round you are in.\n",
    );

    doc
}

/// Binds the persona instructions to the tool surface for one session.
///
/// This is the object the speech pipeline drives: it reads `instructions()`
/// to prime the language model and routes the model's tool calls through
/// `handle`.
#[derive(Debug)]
pub struct ConversationalHost {
    instructions: String,
    tools: ToolSurface,
}

impl ConversationalHost {
    /// Snapshot the session into instructions and take ownership of the
    /// mutation path.
    pub fn new(session: GameSession, bank: ScenarioBank) -> Self {
        let instructions = render_instructions(&session);
        Self {
            instructions,
            tools: ToolSurface::new(session, bank),
        }
    }

    /// The persona document rendered at construction.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The operations the agent may call.
    pub fn catalog(&self) -> &'static [ToolSpec] {
        TOOL_CATALOG
    }

    /// Execute one tool call on behalf of the agent.
    pub fn handle(&mut self, request: ToolRequest) -> String {
        self.tools.dispatch(request)
    }

    /// Read view of the governed session.
    pub fn session(&self) -> &GameSession {
        self.tools.session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::GAME_OVER;
    use show_rules::Phase;

    #[test]
    fn test_instructions_interpolate_state() {
        let instructions = render_instructions(&GameSession::with_player("Ada"));
        assert!(instructions.contains("Player name: Ada"));
        assert!(instructions.contains("Round: 0/3"));
    }

    #[test]
    fn test_instructions_for_unknown_player() {
        let instructions = render_instructions(&GameSession::new());
        assert!(instructions.contains("Player name: Unknown"));
        assert!(instructions.contains("set_player_name"));
    }

    #[test]
    fn test_rendering_is_pure() {
        let session = GameSession::with_player("Ada");
        assert_eq!(render_instructions(&session), render_instructions(&session));
    }

    #[test]
    fn test_host_snapshots_at_construction() {
        let mut host =
            ConversationalHost::new(GameSession::new(), ScenarioBank::standard());
        assert!(host.instructions().contains("Player name: Unknown"));

        host.handle(ToolRequest::SetPlayerName {
            name: "Ada".to_string(),
        });

        // State moved on; the document did not. The agent learns about the
        // change from the tool acknowledgement alone.
        assert_eq!(host.session().player_name.as_deref(), Some("Ada"));
        assert!(host.instructions().contains("Player name: Unknown"));
    }

    #[test]
    fn test_catalog_is_exposed() {
        let host = ConversationalHost::new(GameSession::new(), ScenarioBank::standard());
        assert_eq!(host.catalog().len(), 3);
    }

    #[test]
    fn test_host_plays_a_full_show() {
        // The tool-call sequence a well-behaved agent produces, end to end.
        let mut host =
            ConversationalHost::new(GameSession::new(), ScenarioBank::standard());

        let reply = host.handle(ToolRequest::SetPlayerName {
            name: "Sam".to_string(),
        });
        assert!(reply.contains("Sam"));

        for round in 1..=3 {
            let scenario = host.handle(ToolRequest::GetScenario);
            assert!(scenario.contains(&format!("round {round} of 3")));

            let ack = host.handle(ToolRequest::RecordRoundReaction {
                reaction: format!("round {round} had real commitment"),
            });
            assert!(ack.contains("next round"));
        }

        assert_eq!(host.handle(ToolRequest::GetScenario), GAME_OVER);
        assert_eq!(host.session().phase, Phase::Done);
        assert_eq!(host.session().rounds.len(), 3);
    }
}
