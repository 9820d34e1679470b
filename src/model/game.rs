use chrono::{DateTime, Utc};

/// One scheduled game as reported by the schedule provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub away: String,
    pub home: String,
    pub start: DateTime<Utc>,
    // Broadcast networks, e.g. "ESPN" or "NBA TV/Peacock"
    pub label: Option<String>,
}

/// A game plus its start time rendered in the target timezone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedGameRecord {
    pub game: GameRecord,
    pub display_time: String,
}

/// The rendered text and the chat it goes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: String,
    pub text: String,
}
