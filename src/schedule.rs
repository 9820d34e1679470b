use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, instrument};

use crate::config::TeamLabel;
use crate::error::{NotifyError, Result};
use crate::model::game::GameRecord;
use crate::model::scoreboard::{Competitor, Event, ScoreboardDocument, Team};

/// Turn a scoreboard document into game records, keeping the provider's order.
///
/// An off-day (no events) is an empty vec. Any event missing a team, a side or an
/// unambiguous start time aborts the whole extraction with `UpstreamMalformed`.
#[instrument(level = "debug", skip(doc), fields(events = doc.events.len()))]
pub fn extract_games(doc: &ScoreboardDocument, label: TeamLabel) -> Result<Vec<GameRecord>> {
    let games = doc
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| extract_game(index, event, label))
        .collect::<Result<Vec<_>>>()?;
    debug!(games = games.len(), "Extracted games from scoreboard");
    Ok(games)
}

fn extract_game(index: usize, event: &Event, label: TeamLabel) -> Result<GameRecord> {
    let event_ref = describe_event(index, event);
    let malformed = |what: &str| NotifyError::UpstreamMalformed(format!("{}: {}", event_ref, what));

    let raw_start = event.date.as_deref().ok_or_else(|| malformed("missing start time"))?;
    let start = parse_start(raw_start).ok_or_else(|| malformed(&format!("unusable start time '{}'", raw_start)))?;

    let competition = event.competitions.first().ok_or_else(|| malformed("no competition listed"))?;
    let away = side(&competition.competitors, "away").ok_or_else(|| malformed("missing away competitor"))?;
    let home = side(&competition.competitors, "home").ok_or_else(|| malformed("missing home competitor"))?;
    let away = team_name(away.team.as_ref(), label).ok_or_else(|| malformed("missing away team name"))?;
    let home = team_name(home.team.as_ref(), label).ok_or_else(|| malformed("missing home team name"))?;

    let networks: Vec<&str> = competition
        .broadcasts
        .iter()
        .flat_map(|b| b.names.iter())
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    let label = if networks.is_empty() { None } else { Some(networks.join("/")) };

    Ok(GameRecord { away, home, start, label })
}

fn describe_event(index: usize, event: &Event) -> String {
    match (event.id.as_deref(), event.name.as_deref().or(event.short_name.as_deref())) {
        (Some(id), Some(name)) => format!("event {} ({})", id, name),
        (Some(id), None) => format!("event {}", id),
        (None, Some(name)) => format!("event #{} ({})", index, name),
        (None, None) => format!("event #{}", index),
    }
}

fn side<'a>(competitors: &'a [Competitor], which: &str) -> Option<&'a Competitor> {
    competitors
        .iter()
        .find(|c| c.home_away.as_deref().map(|s| s.eq_ignore_ascii_case(which)).unwrap_or(false))
}

fn team_name(team: Option<&Team>, label: TeamLabel) -> Option<String> {
    let team = team?;
    let raw = match label {
        TeamLabel::Short => team.short_display_name.as_deref(),
        TeamLabel::Full => team.display_name.as_deref(),
        TeamLabel::Abbreviation => team.abbreviation.as_deref(),
    }?
    .trim();
    if raw.is_empty() {
        return None;
    }
    Some(match label {
        TeamLabel::Abbreviation => normalize_abbreviation(raw),
        _ => raw.to_string(),
    })
}

/// Parse a provider start time into an absolute instant.
///
/// Accepts RFC 3339 and ESPN's minute-precision `2025-10-22T23:30Z`.
/// Timestamps without `Z` or an explicit offset are rejected.
pub fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z'))?;
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Normalize an ESPN abbreviation to three letters ("GS" -> "GSW", "UTAH" -> "UTA").
pub fn normalize_abbreviation(abbrev: &str) -> String {
    let upper = abbrev.trim().to_ascii_uppercase();
    match upper.as_str() {
        "NO" => return "NOP".to_string(),
        "SA" => return "SAS".to_string(),
        "NY" => return "NYK".to_string(),
        "GS" => return "GSW".to_string(),
        "UTAH" => return "UTA".to_string(),
        _ => {}
    }
    let chars: Vec<char> = upper.chars().collect();
    match chars.len() {
        0 | 3 => upper,
        n if n > 3 => chars[..3].iter().collect(),
        _ => {
            let mut out = upper.clone();
            let last = chars[chars.len() - 1];
            while out.chars().count() < 3 {
                out.push(last);
            }
            out
        }
    }
}
