//! The scenario bank - the fixed pool of improv prompts rounds draw from.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The prompts the show ships with.
const STANDARD_SCENARIOS: &[&str] = &[
    "You are a time-travelling tour guide explaining modern smartphones to someone from the 1800s.",
    "You are a restaurant waiter who must calmly tell a customer that their order has escaped the kitchen.",
    "You are a customer trying to return an obviously cursed object to a very skeptical shop owner.",
    "You are a cat trying to convince a dog to let you share the bed.",
    "You are a superhero whose only power is making toast slightly faster, interviewing for the Avengers.",
    "You are a alien trying to explain to your leader why you failed to conquer Earth (it was the pizza).",
];

/// Errors raised while building a scenario bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// The TOML document could not be parsed.
    #[error("failed to parse scenario bank: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but held no usable prompts.
    #[error("scenario bank contains no scenarios")]
    Empty,
}

/// On-disk shape of a scenario bank document.
#[derive(Debug, Deserialize)]
struct BankDocument {
    scenarios: Vec<String>,
}

/// A pool of scenario prompts.
///
/// Draws are uniform-random with replacement, so the same prompt can come up
/// twice within one show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioBank {
    scenarios: Vec<String>,
}

impl ScenarioBank {
    /// Create a bank from an arbitrary set of prompts.
    pub fn new(scenarios: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            scenarios: scenarios.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard bank the show ships with.
    pub fn standard() -> Self {
        Self::new(STANDARD_SCENARIOS.iter().copied())
    }

    /// Load a bank from a TOML document of the form
    /// `scenarios = ["prompt", ...]`.
    ///
    /// Blank prompts are discarded; a document with nothing left is an error.
    pub fn from_toml_str(raw: &str) -> Result<Self, BankError> {
        let document: BankDocument = toml::from_str(raw)?;
        let scenarios: Vec<String> = document
            .scenarios
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if scenarios.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { scenarios })
    }

    /// Draw one prompt uniformly at random, with replacement.
    ///
    /// Returns `None` only when the bank is empty.
    pub fn random_scenario(&self) -> Option<&str> {
        self.scenarios
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }

    /// Check whether a prompt belongs to this bank.
    pub fn contains(&self, scenario: &str) -> bool {
        self.scenarios.iter().any(|s| s == scenario)
    }

    /// All prompts in the bank, in declaration order.
    pub fn scenarios(&self) -> &[String] {
        &self.scenarios
    }

    /// Number of prompts in the bank.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Check whether the bank holds no prompts.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioBank {
    fn default() -> Self {
        Self::standard()
    }
}
