use serde::{Deserialize, Serialize};

/// Closed set of moods, ordered from lowest to highest
///
/// Clients pick a mood by its 1-based number, see [`Mood::show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    Sadness,
    Longing,
    Gloom,
    Apathy,
    Calm,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Sadness,
        Mood::Longing,
        Mood::Gloom,
        Mood::Apathy,
        Mood::Calm,
    ];

    /// Number of moods
    pub fn count() -> usize {
        Self::ALL.len()
    }

    /// Mood for a 1-based number, `None` outside `[1, count()]`
    pub fn from_number(number: usize) -> Option<Mood> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based number of this mood
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Sadness => "SADNESS",
            Mood::Longing => "LONGING",
            Mood::Gloom => "GLOOM",
            Mood::Apathy => "APATHY",
            Mood::Calm => "CALM",
        }
    }

    /// Numbered listing, one mood per line
    pub fn show() -> String {
        Self::ALL
            .iter()
            .map(|mood| format!("{} - {}", mood.number(), mood.name()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
