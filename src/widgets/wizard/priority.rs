use serde::{Deserialize, Serialize};

/// What the visitor says they are doing, in increasing order of intent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Learning,
    Comparing,
    Planning,
    ReadyToBook,
}

impl Intent {
    pub fn score(self) -> u8 {
        match self {
            Self::Learning => 1,
            Self::Comparing => 2,
            Self::Planning => 3,
            Self::ReadyToBook => 4,
        }
    }
}

/// Self-reported experience bracket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Experience {
    #[serde(rename = "0-10")]
    #[strum(serialize = "0-10")]
    Novice,
    #[serde(rename = "10-30")]
    #[strum(serialize = "10-30")]
    Seasoned,
    #[serde(rename = "30+")]
    #[strum(serialize = "30+")]
    Veteran,
}

impl Experience {
    pub fn score(self) -> u8 {
        match self {
            Self::Novice => 1,
            Self::Seasoned => 2,
            Self::Veteran => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Hot,
    Warm,
    Cold,
}

/// Map declared intent and experience to a follow-up priority.
///
/// Missing answers score zero.
pub fn classify(intent: Option<Intent>, experience: Option<Experience>) -> Priority {
    let intent = intent.map_or(0, Intent::score);
    let experience = experience.map_or(0, Experience::score);
    if intent >= 4 {
        Priority::Hot
    } else if intent >= 3 || (intent >= 2 && experience >= 2) {
        Priority::Warm
    } else {
        Priority::Cold
    }
}
