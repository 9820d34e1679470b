use chrono::NaiveDate;

use crate::model::game::LocalizedGameRecord;

pub const NO_GAMES_LINE: &str = "No NBA games today 🏀";

/// Rendering switches that come from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_broadcasts: bool,
}

pub fn header(date: NaiveDate) -> String {
    format!("🏀 NBA Games Today ({}):", date.format("%b %d, %Y"))
}

/// One game in the form "Kings @ Bucks — 5:00 PM MST".
pub fn game_line(record: &LocalizedGameRecord, options: RenderOptions) -> String {
    let mut line = format!("{} @ {} — {}", record.game.away, record.game.home, record.display_time);
    if options.show_broadcasts {
        if let Some(label) = record.game.label.as_deref() {
            line.push_str(" (");
            line.push_str(label);
            line.push(')');
        }
    }
    line
}

/// Everything below the header: one line per game in input order, or the no-games line.
pub fn render_body(games: &[LocalizedGameRecord], options: RenderOptions) -> String {
    if games.is_empty() {
        return NO_GAMES_LINE.to_string();
    }
    games
        .iter()
        .map(|g| game_line(g, options))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(date: NaiveDate, games: &[LocalizedGameRecord], options: RenderOptions) -> String {
    format!("{}\n{}", header(date), render_body(games, options))
}
