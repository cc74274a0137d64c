//! chess.com PGN header block.
//!
//! The API serves each game's PGN as one newline-delimited blob: 21 tag
//! lines, a blank separator, the movetext line, and a trailing empty line
//! after the final newline. That layout is treated as a fixed positional
//! record.

use smallvec::SmallVec;
use std::fmt;

pub const PGN_LINE_COUNT: usize = 24;
pub const PGN_FIELD_COUNT: usize = 22;

const SEPARATOR_LINE: usize = 21;
const TRAILING_LINE: usize = 23;

/// Tag label stripped from each kept line, in line order. The movetext has
/// no label.
const FIELD_LABELS: [&str; PGN_FIELD_COUNT] = [
    "Event ",
    "Site ",
    "Date ",
    "Round ",
    "White ",
    "Black ",
    "Result ",
    "CurrentPosition ",
    "Timezone ",
    "ECO ",
    "ECOUrl ",
    "UTCDate ",
    "UTCTime ",
    "WhiteElo ",
    "BlackElo ",
    "TimeControl ",
    "Termination ",
    "StartTime ",
    "EndDate ",
    "EndTime ",
    "Link ",
    "",
];

type PgnLines<'a> = SmallVec<[&'a str; PGN_LINE_COUNT]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnShapeError {
    pub line_count: usize,
}

impl fmt::Display for PgnShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pgn has {} lines, expected {PGN_LINE_COUNT}",
            self.line_count
        )
    }
}

impl std::error::Error for PgnShapeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnRecord {
    fields: [String; PGN_FIELD_COUNT],
}

macro_rules! pgn_accessors {
    ($($name:ident = $idx:expr),* $(,)?) => {
        impl PgnRecord {
            $(
                pub fn $name(&self) -> &str {
                    &self.fields[$idx]
                }
            )*
        }
    };
}

pgn_accessors! {
    event = 0,
    site = 1,
    date = 2,
    round = 3,
    white = 4,
    black = 5,
    result = 6,
    current_position = 7,
    timezone = 8,
    eco = 9,
    eco_url = 10,
    utc_date = 11,
    utc_time = 12,
    white_elo = 13,
    black_elo = 14,
    time_control = 15,
    termination = 16,
    start_time = 17,
    end_date = 18,
    end_time = 19,
    link = 20,
    moves = 21,
}

/// Remove the tag decoration: every `"`, `[` and `]`.
fn strip_decoration(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '"' | '[' | ']'))
        .collect()
}

fn strip_label(value: String, label: &str) -> String {
    if label.is_empty() {
        return value;
    }
    match value.strip_prefix(label) {
        Some(rest) => rest.to_string(),
        None => value,
    }
}

impl PgnRecord {
    pub fn parse(blob: &str) -> Result<Self, PgnShapeError> {
        let lines: PgnLines<'_> = blob
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        if lines.len() != PGN_LINE_COUNT {
            return Err(PgnShapeError {
                line_count: lines.len(),
            });
        }

        let kept = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != SEPARATOR_LINE && *i != TRAILING_LINE)
            .map(|(_, line)| *line);

        let mut fields: [String; PGN_FIELD_COUNT] = Default::default();
        for ((slot, line), label) in fields.iter_mut().zip(kept).zip(FIELD_LABELS) {
            *slot = strip_label(strip_decoration(line), label);
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[String; PGN_FIELD_COUNT] {
        &self.fields
    }
}
