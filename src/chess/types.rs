use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

/// One element of the tournament round's `games` list, as served by the
/// chess.com public API. Every key is optional.
///
/// Keys that feed a row column are typed; the rest stay raw `Value`s so an
/// odd type there never costs the game its row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGame {
    pub url: Option<String>,
    pub time_control: Option<Value>,
    pub end_time: Option<Value>,
    pub rated: Option<bool>,
    pub fen: Option<Value>,
    pub time_class: Option<String>,
    pub rules: Option<String>,
    pub eco: Option<Value>,
    pub pgn: Option<String>,
    pub white: Option<RawSide>,
    pub black: Option<RawSide>,
}

impl RawGame {
    /// `pgn` when present and not blank.
    pub fn pgn_text(&self) -> Option<&str> {
        self.pgn.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Per-colour player block. Keys are read by name; unknown keys (`uuid`)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSide {
    pub rating: Option<Value>,
    pub result: Option<String>,
    #[serde(rename = "@id", alias = "id")]
    pub id: Option<String>,
    pub username: Option<Value>,
}

/// Flattened output record, one per game. Column order and rendering live in
/// [`super::schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub game_id: String,
    pub url: String,
    pub event: String,
    pub tournament_id: String,
    pub site: String,
    pub rated: Option<bool>,
    pub time_class: String,
    pub rules: String,
    pub date: String,
    pub round: String,
    pub time_control: String,
    pub result: String,
    pub termination: String,

    // White
    pub white: String,
    pub white_elo: String,
    pub white_id: String,
    pub white_result: String,
    pub white_points: f32,

    // Black
    pub black: String,
    pub black_elo: String,
    pub black_id: String,
    pub black_result: String,
    pub black_points: f32,

    // Timing
    pub timezone: String,
    pub utc_date: String,
    pub utc_time: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,

    // Opening and position
    pub eco: String,
    pub eco_url: String,
    pub current_position: String,
    pub moves: String,

    pub scrapy_date: NaiveDateTime,
}
