use serde::{Deserialize, Serialize};

/// Subset of the ESPN scoreboard document the notifier reads.
/// Fields are optional so missing data is reported per event by the extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScoreboardDocument {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: Option<String>,
    pub team: Option<Team>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub abbreviation: Option<String>,
    pub display_name: Option<String>,
    pub short_display_name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(default)]
    pub names: Vec<String>,
}
