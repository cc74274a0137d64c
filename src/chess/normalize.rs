//! Flattening of one tournament round's `games` list into [`GameRow`]s.
//!
//! Each game is visited once and every cell of its row is taken from that
//! game. Malformed games are skipped and reported, never fatal.

use super::error::{Error, ErrorAccumulator, Result};
use super::pgn::PgnRecord;
use super::types::{GameRow, RawGame, RawSide};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// URL prefixes stripped to obtain `game_id`.
const GAME_URL_PREFIXES: [&str; 2] = [
    "https://www.chess.com/game/live/",
    "https://www.chess.com/game/daily/",
];

const SHORT_CODE_LEN: usize = 7;

/// A game that was dropped because its record did not have the expected
/// shape. `index` is the game's position in the API's `games` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGame {
    pub tournament: String,
    pub index: usize,
    pub url: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub rows: Vec<GameRow>,
    pub skipped: Vec<SkippedGame>,
}

/// The 7 characters immediately before the last `/` of a tournament
/// identifier (`vii-arena-loggichess-1171620/1` -> `1171620`). Without a
/// `/`, the last 7 characters of the identifier.
pub fn tournament_code(tournament_id: &str) -> String {
    let head = match tournament_id.rfind('/') {
        Some(slash) => &tournament_id[..slash],
        None => tournament_id,
    };
    let skip = head.chars().count().saturating_sub(SHORT_CODE_LEN);
    head.chars().skip(skip).collect()
}

pub fn game_id_from_url(url: &str) -> &str {
    GAME_URL_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url)
}

/// `(white_points, black_points)` for a PGN `Result` value. Anything other
/// than a decisive result scores as a draw.
pub fn points_for_result(result: &str) -> (f32, f32) {
    match result {
        "1-0" => (1.0, 0.0),
        "0-1" => (0.0, 1.0),
        _ => (0.5, 0.5),
    }
}

/// Accepts the API envelope `{"games": [...]}` or a bare array.
fn games_list(raw_json: &Value) -> Result<&Vec<Value>> {
    match raw_json {
        Value::Object(map) => match map.get("games") {
            Some(Value::Array(games)) => Ok(games),
            Some(_) => Err(Error::Shape {
                context: "'games' is not an array".to_string(),
            }),
            None => Err(Error::Shape {
                context: "missing 'games' key".to_string(),
            }),
        },
        Value::Array(games) => Ok(games),
        _ => Err(Error::Shape {
            context: "expected an object with 'games' or an array of games".to_string(),
        }),
    }
}

/// The side's `(result, id)`; both keys are required.
fn side_keys<'a>(
    side: Option<&'a RawSide>,
    colour: &str,
    problems: &mut ErrorAccumulator,
) -> Option<(&'a str, &'a str)> {
    let Some(side) = side else {
        problems.push(&format!("missing '{colour}' block"));
        return None;
    };
    let result = side.result.as_deref();
    let id = side.id.as_deref();
    if result.is_none() {
        problems.push(&format!("'{colour}' has no 'result'"));
    }
    if id.is_none() {
        problems.push(&format!("'{colour}' has no '@id'"));
    }
    Some((result?, id?))
}

fn build_row(
    game: &RawGame,
    pgn: &PgnRecord,
    white: (&str, &str),
    black: (&str, &str),
    code: &str,
    scraped_at: NaiveDateTime,
) -> GameRow {
    let url = game.url.clone().unwrap_or_default();
    let (white_points, black_points) = points_for_result(pgn.result());

    GameRow {
        game_id: game_id_from_url(&url).to_string(),
        event: pgn.event().to_string(),
        tournament_id: code.to_string(),
        site: pgn.site().to_string(),
        rated: game.rated,
        time_class: game.time_class.clone().unwrap_or_default(),
        rules: game.rules.clone().unwrap_or_default(),
        date: pgn.date().to_string(),
        round: pgn.round().to_string(),
        time_control: pgn.time_control().to_string(),
        result: pgn.result().to_string(),
        termination: pgn.termination().to_string(),
        white: pgn.white().to_string(),
        white_elo: pgn.white_elo().to_string(),
        white_id: white.1.to_string(),
        white_result: white.0.to_string(),
        white_points,
        black: pgn.black().to_string(),
        black_elo: pgn.black_elo().to_string(),
        black_id: black.1.to_string(),
        black_result: black.0.to_string(),
        black_points,
        timezone: pgn.timezone().to_string(),
        utc_date: pgn.utc_date().to_string(),
        utc_time: pgn.utc_time().to_string(),
        start_time: pgn.start_time().to_string(),
        end_date: pgn.end_date().to_string(),
        end_time: pgn.end_time().to_string(),
        eco: pgn.eco().to_string(),
        eco_url: pgn.eco_url().to_string(),
        current_position: pgn.current_position().to_string(),
        moves: pgn.moves().to_string(),
        scrapy_date: scraped_at,
        url,
    }
}

/// Flatten one tournament round's game list into rows sorted by `game_id`.
///
/// Every field of a row comes from the same game. Games without a PGN blob
/// produce no row. Games whose PGN or player blocks are malformed are
/// skipped and reported in [`Normalized::skipped`]; they never abort the
/// tournament.
pub fn normalize(
    tournament_id: &str,
    raw_json: &Value,
    scraped_at: NaiveDateTime,
) -> Result<Normalized> {
    let games = games_list(raw_json)?;
    let code = tournament_code(tournament_id);
    let mut out = Normalized {
        rows: Vec::with_capacity(games.len()),
        skipped: Vec::new(),
    };

    for (index, value) in games.iter().enumerate() {
        let mut problems = ErrorAccumulator::default();

        let game = match RawGame::deserialize(value) {
            Ok(game) => game,
            Err(e) => {
                problems.push(&format!("unreadable game record ({e})"));
                let url = value.get("url").and_then(Value::as_str).map(str::to_string);
                out.skip(tournament_id, index, url, &mut problems);
                continue;
            }
        };

        let Some(pgn_text) = game.pgn_text() else {
            debug!(tournament = tournament_id, index, "game has no pgn, dropped");
            continue;
        };

        let pgn = match PgnRecord::parse(pgn_text) {
            Ok(pgn) => Some(pgn),
            Err(e) => {
                problems.push(&e.to_string());
                None
            }
        };
        let white = side_keys(game.white.as_ref(), "white", &mut problems);
        let black = side_keys(game.black.as_ref(), "black", &mut problems);

        match (pgn, white, black) {
            (Some(pgn), Some(white), Some(black)) => {
                out.rows
                    .push(build_row(&game, &pgn, white, black, &code, scraped_at));
            }
            _ => out.skip(tournament_id, index, game.url.clone(), &mut problems),
        }
    }

    out.rows.sort_by(|a, b| a.game_id.cmp(&b.game_id));
    Ok(out)
}

impl Normalized {
    fn skip(
        &mut self,
        tournament: &str,
        index: usize,
        url: Option<String>,
        problems: &mut ErrorAccumulator,
    ) {
        let reason = problems
            .take()
            .unwrap_or_else(|| "malformed game".to_string());
        warn!(
            tournament,
            index,
            url = url.as_deref().unwrap_or(""),
            reason = %reason,
            "skipping game"
        );
        self.skipped.push(SkippedGame {
            tournament: tournament.to_string(),
            index,
            url,
            reason,
        });
    }
}
