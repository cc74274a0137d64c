pub mod batch;
pub mod error;
pub mod fetch;
pub mod log;
pub mod normalize;
pub mod pgn;
pub mod schema;
pub mod sink;
pub mod types;

pub use batch::{BatchReport, Table, TableBuilder, run};
pub use error::{Error, ErrorAccumulator, Result};
pub use fetch::{DirFetcher, Fetcher, HttpFetcher};
pub use normalize::{Normalized, SkippedGame, normalize};
pub use sink::{Delim, write_table};
pub use types::{GameRow, RawGame, RawSide};
