//! Public types for the companion API
use serde::{Deserialize, Serialize};

const MAX_STAT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub energy: i64,
    pub happiness: i64,
    pub level: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Feed,
    Play,
    Train,
}

#[derive(Deserialize)]
pub struct InteractRequest {
    pub action: Action,
}

impl Companion {
    /// Stats after performing `action`. Energy and happiness stay
    /// within 0..=100, level is unbounded.
    pub fn interact(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::Feed => {
                next.energy = (self.energy + 10).min(MAX_STAT);
                next.happiness = (self.happiness + 5).min(MAX_STAT);
            }
            Action::Play => {
                next.happiness = (self.happiness + 10).min(MAX_STAT);
                next.energy = (self.energy - 5).max(0);
            }
            Action::Train => {
                next.level = self.level + 1;
                next.energy = (self.energy - 10).max(0);
            }
        }
        next
    }
}
