use super::error::{Error, Result};
use super::fetch::Fetcher;
use super::normalize::{SkippedGame, normalize};
use super::schema::{GAME_COLUMN_COUNT, header};
use super::types::GameRow;
use chrono::NaiveDateTime;
use tracing::info;

/// Rows of every tournament in a run, concatenated in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<GameRow>,
}

impl Table {
    pub fn columns(&self) -> Vec<&'static str> {
        header()
    }

    pub fn column_count(&self) -> usize {
        GAME_COLUMN_COUNT
    }

    pub fn rows(&self) -> &[GameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Append-only accumulator threaded through a run. Each tournament's rows
/// keep their own order; nothing is re-sorted across tournaments.
#[derive(Debug, Default)]
pub struct TableBuilder {
    rows: Vec<GameRow>,
    skipped: Vec<SkippedGame>,
    tournaments: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_tournament(&mut self, rows: Vec<GameRow>, skipped: Vec<SkippedGame>) {
        self.rows.extend(rows);
        self.skipped.extend(skipped);
        self.tournaments += 1;
    }

    pub fn finish(self) -> BatchReport {
        BatchReport {
            table: Table { rows: self.rows },
            skipped: self.skipped,
            tournaments: self.tournaments,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub table: Table,
    pub skipped: Vec<SkippedGame>,
    pub tournaments: usize,
}

/// Fetch and normalize each tournament in turn.
///
/// Any fetch or parse failure aborts the whole run; nothing is returned for
/// the tournaments that already succeeded. `scraped_at` is stamped on every
/// row of the run.
pub fn run<F, S>(fetcher: &F, tournament_ids: &[S], scraped_at: NaiveDateTime) -> Result<BatchReport>
where
    F: Fetcher + ?Sized,
    S: AsRef<str>,
{
    let mut builder = TableBuilder::new();

    for id in tournament_ids {
        let id = id.as_ref();
        let body = fetcher.fetch(id)?;
        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| Error::Parse {
            tournament: id.to_string(),
            message: e.to_string(),
        })?;

        let normalized = normalize(id, &raw, scraped_at).map_err(|e| match e {
            Error::Shape { context } => Error::Parse {
                tournament: id.to_string(),
                message: context,
            },
            other => other,
        })?;

        info!(
            tournament = id,
            rows = normalized.rows.len(),
            skipped = normalized.skipped.len(),
            "tournament normalized"
        );
        builder.push_tournament(normalized.rows, normalized.skipped);
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::pgn::tests::sample_pgn;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MapFetcher {
        bodies: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl MapFetcher {
        fn new(entries: &[(&str, String)]) -> Self {
            Self {
                bodies: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetcher for MapFetcher {
        fn fetch(&self, tournament_id: &str) -> Result<String> {
            self.calls.borrow_mut().push(tournament_id.to_string());
            self.bodies
                .get(tournament_id)
                .cloned()
                .ok_or_else(|| Error::Http {
                    tournament: tournament_id.to_string(),
                    status: 404,
                })
        }
    }

    fn scraped_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    fn body(ids: &[u64]) -> String {
        let games: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "url": format!("https://www.chess.com/game/live/{id}"),
                    "pgn": sample_pgn("1-0"),
                    "rated": true,
                    "time_class": "blitz",
                    "rules": "chess",
                    "white": { "result": "win", "@id": "w" },
                    "black": { "result": "resigned", "@id": "b" },
                })
            })
            .collect();
        json!({ "games": games }).to_string()
    }

    #[test]
    fn test_run_concatenates_in_input_order_without_resorting() {
        let fetcher = MapFetcher::new(&[
            ("arena-1171621/1", body(&[9, 7])),
            ("arena-1171620/1", body(&[3, 1])),
        ]);
        let ids = ["arena-1171621/1", "arena-1171620/1"];

        let report = run(&fetcher, &ids, scraped_at()).unwrap();

        let got: Vec<(&str, &str)> = report
            .table
            .rows()
            .iter()
            .map(|r| (r.tournament_id.as_str(), r.game_id.as_str()))
            .collect();
        assert_eq!(
            got,
            [
                ("1171621", "7"),
                ("1171621", "9"),
                ("1171620", "1"),
                ("1171620", "3"),
            ]
        );
        assert_eq!(report.tournaments, 2);
        assert_eq!(*fetcher.calls.borrow(), ids);
    }

    #[test]
    fn test_scrapy_date_is_shared_by_all_rows() {
        let fetcher = MapFetcher::new(&[
            ("a-1111111/1", body(&[1, 2])),
            ("b-2222222/1", body(&[3])),
        ]);
        let report = run(&fetcher, &["a-1111111/1", "b-2222222/1"], scraped_at()).unwrap();

        assert_eq!(report.table.len(), 3);
        assert!(
            report
                .table
                .rows()
                .iter()
                .all(|r| r.scrapy_date == scraped_at())
        );
    }

    #[test]
    fn test_fetch_failure_aborts_the_batch() {
        let fetcher = MapFetcher::new(&[("a-1111111/1", body(&[1]))]);
        let err = run(&fetcher, &["a-1111111/1", "missing/1", "never/1"], scraped_at())
            .unwrap_err();

        assert!(matches!(err, Error::Http { status: 404, .. }));
        assert_eq!(*fetcher.calls.borrow(), ["a-1111111/1", "missing/1"]);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let fetcher = MapFetcher::new(&[("a-1111111/1", "<not json".to_string())]);
        let err = run(&fetcher, &["a-1111111/1"], scraped_at()).unwrap_err();
        match err {
            Error::Parse { tournament, .. } => assert_eq!(tournament, "a-1111111/1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_games_envelope_is_parse_error_naming_tournament() {
        let fetcher = MapFetcher::new(&[("a-1111111/1", r#"{"players": []}"#.to_string())]);
        let err = run(&fetcher, &["a-1111111/1"], scraped_at()).unwrap_err();
        assert!(err.to_string().contains("a-1111111/1"));
    }

    #[test]
    fn test_empty_id_list_yields_empty_table() {
        let fetcher = MapFetcher::new(&[]);
        let ids: [&str; 0] = [];
        let report = run(&fetcher, &ids, scraped_at()).unwrap();
        assert!(report.table.is_empty());
        assert_eq!(report.table.columns().len(), report.table.column_count());
    }
}
