use super::error::{Error, Result};
use regex::Regex;
use reqwest::blocking::Client;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub/tournament";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

static MARKUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("valid markup tag regex"));

/// Source of the raw JSON text for one tournament round.
pub trait Fetcher {
    fn fetch(&self, tournament_id: &str) -> Result<String>;
}

/// Reduce an HTML-wrapped document to its text content. Anything not
/// starting with a tag, JSON included, is returned untouched.
pub fn strip_markup(body: &str) -> Cow<'_, str> {
    if !body.trim_start().starts_with('<') {
        return Cow::Borrowed(body);
    }
    let text = MARKUP_TAG_RE.replace_all(body, "");
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&"),
    )
}

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Fetch {
                tournament: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, tournament_id: &str) -> String {
        format!("{}/{}", self.base_url, tournament_id.trim_start_matches('/'))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, tournament_id: &str) -> Result<String> {
        let url = self.url_for(tournament_id);
        debug!(%url, "fetching tournament");

        let fetch_err = |e: reqwest::Error| Error::Fetch {
            tournament: tournament_id.to_string(),
            message: e.to_string(),
        };

        let resp = self.client.get(&url).send().map_err(fetch_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                tournament: tournament_id.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(fetch_err)?;
        debug!(%url, bytes = body.len(), "fetched tournament");

        Ok(strip_markup(&body).into_owned())
    }
}

/// Replays saved API responses from a directory: tournament
/// `name-1171620/1` is read from `<dir>/name-1171620_1.json`.
pub struct DirFetcher {
    dir: PathBuf,
}

impl DirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(tournament_id: &str) -> String {
        format!("{}.json", tournament_id.replace('/', "_"))
    }

    pub fn path_for(&self, tournament_id: &str) -> PathBuf {
        self.dir.join(Self::file_name(tournament_id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Fetcher for DirFetcher {
    fn fetch(&self, tournament_id: &str) -> Result<String> {
        let path = self.path_for(tournament_id);
        debug!(path = %path.display(), "reading saved tournament");
        let body = fs::read_to_string(&path).map_err(|e| Error::Fetch {
            tournament: tournament_id.to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        Ok(strip_markup(&body).into_owned())
    }
}
