use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::model::game::{GameRecord, LocalizedGameRecord};

/// Render an instant as a 12-hour clock time with the zone abbreviation, e.g. "2:00 PM MST".
pub fn display_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p %Z").to_string()
}

pub fn localize(game: GameRecord, tz: Tz) -> LocalizedGameRecord {
    let display_time = display_time(game.start, tz);
    LocalizedGameRecord { game, display_time }
}

pub fn localize_all(games: Vec<GameRecord>, tz: Tz) -> Vec<LocalizedGameRecord> {
    games.into_iter().map(|g| localize(g, tz)).collect()
}

/// The civil date of `now` in the target zone.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}
