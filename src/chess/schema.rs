use super::types::GameRow;
use std::borrow::Cow;

pub const GAME_COLUMN_COUNT: usize = 34;

pub const SCRAPY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output columns, in file order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameColumn {
    GameId = 0,
    Url = 1,
    Event = 2,
    TournamentId = 3,
    Site = 4,
    Rated = 5,
    TimeClass = 6,
    Rules = 7,
    Date = 8,
    Round = 9,
    TimeControl = 10,
    Result = 11,
    Termination = 12,
    White = 13,
    WhiteElo = 14,
    WhiteId = 15,
    WhiteResult = 16,
    WhitePoints = 17,
    Black = 18,
    BlackElo = 19,
    BlackId = 20,
    BlackResult = 21,
    BlackPoints = 22,
    Timezone = 23,
    UtcDate = 24,
    UtcTime = 25,
    StartTime = 26,
    EndDate = 27,
    EndTime = 28,
    Eco = 29,
    EcoUrl = 30,
    CurrentPosition = 31,
    Moves = 32,
    ScrapyDate = 33,
}

impl GameColumn {
    pub const ALL: [GameColumn; GAME_COLUMN_COUNT] = [
        Self::GameId,
        Self::Url,
        Self::Event,
        Self::TournamentId,
        Self::Site,
        Self::Rated,
        Self::TimeClass,
        Self::Rules,
        Self::Date,
        Self::Round,
        Self::TimeControl,
        Self::Result,
        Self::Termination,
        Self::White,
        Self::WhiteElo,
        Self::WhiteId,
        Self::WhiteResult,
        Self::WhitePoints,
        Self::Black,
        Self::BlackElo,
        Self::BlackId,
        Self::BlackResult,
        Self::BlackPoints,
        Self::Timezone,
        Self::UtcDate,
        Self::UtcTime,
        Self::StartTime,
        Self::EndDate,
        Self::EndTime,
        Self::Eco,
        Self::EcoUrl,
        Self::CurrentPosition,
        Self::Moves,
        Self::ScrapyDate,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        GAME_COLUMN_NAMES[self.index()]
    }
}

const GAME_COLUMN_NAMES: [&str; GAME_COLUMN_COUNT] = [
    "game_id",
    "url",
    "event",
    "tournament_id",
    "site",
    "rated",
    "time_class",
    "rules",
    "date",
    "round",
    "time_control",
    "result",
    "termination",
    "white",
    "white_elo",
    "white_id",
    "white_result",
    "white_points",
    "black",
    "black_elo",
    "black_id",
    "black_result",
    "black_points",
    "timezone",
    "utc_date",
    "utc_time",
    "start_time",
    "end_date",
    "end_time",
    "eco",
    "eco_url",
    "current_position",
    "moves",
    "scrapy_date",
];

pub fn header() -> Vec<&'static str> {
    GameColumn::ALL.iter().map(|c| c.name()).collect()
}

fn render_points(points: f32) -> String {
    // f32 Display prints 1 / 0 / 0.5
    points.to_string()
}

impl GameRow {
    pub fn cell(&self, column: GameColumn) -> Cow<'_, str> {
        let text: &str = match column {
            GameColumn::GameId => &self.game_id,
            GameColumn::Url => &self.url,
            GameColumn::Event => &self.event,
            GameColumn::TournamentId => &self.tournament_id,
            GameColumn::Site => &self.site,
            GameColumn::Rated => {
                return Cow::Borrowed(match self.rated {
                    Some(true) => "true",
                    Some(false) => "false",
                    None => "",
                });
            }
            GameColumn::TimeClass => &self.time_class,
            GameColumn::Rules => &self.rules,
            GameColumn::Date => &self.date,
            GameColumn::Round => &self.round,
            GameColumn::TimeControl => &self.time_control,
            GameColumn::Result => &self.result,
            GameColumn::Termination => &self.termination,
            GameColumn::White => &self.white,
            GameColumn::WhiteElo => &self.white_elo,
            GameColumn::WhiteId => &self.white_id,
            GameColumn::WhiteResult => &self.white_result,
            GameColumn::WhitePoints => return Cow::Owned(render_points(self.white_points)),
            GameColumn::Black => &self.black,
            GameColumn::BlackElo => &self.black_elo,
            GameColumn::BlackId => &self.black_id,
            GameColumn::BlackResult => &self.black_result,
            GameColumn::BlackPoints => return Cow::Owned(render_points(self.black_points)),
            GameColumn::Timezone => &self.timezone,
            GameColumn::UtcDate => &self.utc_date,
            GameColumn::UtcTime => &self.utc_time,
            GameColumn::StartTime => &self.start_time,
            GameColumn::EndDate => &self.end_date,
            GameColumn::EndTime => &self.end_time,
            GameColumn::Eco => &self.eco,
            GameColumn::EcoUrl => &self.eco_url,
            GameColumn::CurrentPosition => &self.current_position,
            GameColumn::Moves => &self.moves,
            GameColumn::ScrapyDate => {
                return Cow::Owned(self.scrapy_date.format(SCRAPY_DATE_FORMAT).to_string());
            }
        };
        Cow::Borrowed(text)
    }

    /// All cells in column order.
    pub fn cells(&self) -> Vec<Cow<'_, str>> {
        GameColumn::ALL.iter().map(|&c| self.cell(c)).collect()
    }
}
