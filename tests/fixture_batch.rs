use chess_tournaments::chess::{self, DirFetcher, Error, sink::Delim};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

const ROUND_ONE: &str = "vii-arena-loggichess-1171620/1";
const ROUND_TWO: &str = "vii-arena-loggichess-1171621/1";

fn fixtures() -> DirFetcher {
    DirFetcher::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn scraped_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(23, 59, 1)
        .unwrap()
}

#[test]
fn test_two_rounds_from_saved_responses() {
    let report = chess::run(&fixtures(), &[ROUND_ONE, ROUND_TWO], scraped_at()).unwrap();

    let ids: Vec<&str> = report
        .table
        .rows()
        .iter()
        .map(|r| r.game_id.as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "88124410002",
            "88124410007",
            "88124410011",
            "88124420010",
            "88124420020",
        ]
    );
    assert_eq!(report.tournaments, 2);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].tournament, ROUND_ONE);
    assert_eq!(report.skipped[0].index, 4);
    assert!(report.skipped[0].reason.contains("pgn has 23 lines"));
}

#[test]
fn test_rows_keep_their_own_game_fields() {
    let report = chess::run(&fixtures(), &[ROUND_ONE], scraped_at()).unwrap();
    let rows = report.table.rows();

    let draw = &rows[0];
    assert_eq!(draw.game_id, "88124410002");
    assert_eq!(draw.result, "1/2-1/2");
    assert_eq!((draw.white_points, draw.black_points), (0.5, 0.5));
    assert_eq!(draw.white_result, "agreed");
    assert_eq!(draw.time_class, "blitz");

    let mate = &rows[1];
    assert_eq!(mate.game_id, "88124410007");
    assert_eq!(mate.white, "tal_memorial");
    assert_eq!(mate.black_id, "https://api.chess.com/pub/player/magnus_fan");
    assert_eq!(mate.black_result, "win");
    assert_eq!((mate.white_points, mate.black_points), (0.0, 1.0));
    assert_eq!(mate.time_class, "bullet");
    assert_eq!(mate.rated, Some(false));
    assert_eq!(mate.termination, "magnus_fan won by checkmate");

    for row in rows {
        assert_eq!(row.tournament_id, "1171620");
        assert_eq!(row.event, "Vii Arena LoggiChess");
        assert_eq!(row.timezone, "UTC");
        assert_eq!(row.time_control, "180+2");
    }
}

#[test]
fn test_written_file_has_header_and_one_line_per_row() {
    let report = chess::run(&fixtures(), &[ROUND_ONE, ROUND_TWO], scraped_at()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processed_tournament_data.csv");

    chess::write_table(&path, &report.table, Delim::Csv).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + report.table.len());
    assert_eq!(lines[0].split(',').count(), 34);
    assert!(
        lines[1..]
            .iter()
            .all(|l| l.ends_with(",2024-02-29 23:59:01"))
    );
}

#[test]
fn test_rerun_differs_only_in_scrapy_date() {
    let first = chess::run(&fixtures(), &[ROUND_ONE], scraped_at()).unwrap();
    let later = scraped_at() + chrono::Duration::hours(1);
    let mut second = chess::run(&fixtures(), &[ROUND_ONE], later).unwrap();

    assert_ne!(first.table, second.table);
    let rows: Vec<_> = second
        .table
        .rows()
        .iter()
        .cloned()
        .map(|mut r| {
            r.scrapy_date = scraped_at();
            r
        })
        .collect();
    second.table = {
        let mut builder = chess::TableBuilder::new();
        builder.push_tournament(rows, Vec::new());
        builder.finish().table
    };
    assert_eq!(first.table, second.table);
}

#[test]
fn test_unknown_round_aborts_and_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processed_tournament_data.csv");
    fs::write(&path, "previous run\n").unwrap();

    let result = chess::run(&fixtures(), &[ROUND_ONE, "missing-0000000/1"], scraped_at())
        .and_then(|report| chess::write_table(&path, &report.table, Delim::Csv));

    assert!(matches!(result, Err(Error::Fetch { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\n");
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, [std::ffi::OsString::from("processed_tournament_data.csv")]);
}
