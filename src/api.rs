// src/api.rs
//
// Backend REST client. Blocking; always called from a worker thread
// (see task.rs), never from the UI thread.

use reqwest::{
    StatusCode, Url,
    blocking::Client,
};
use serde::de::DeserializeOwned;

use crate::{
    config::{consts::USER_AGENT, options::{ApiOptions, normalize_base_url}},
    error::{FetchError, Result},
    model::{RankingRecord, School, SchoolSummary},
};

/// The three backend lookups the UI needs.
pub trait SchoolApi: Send + Sync {
    /// `GET {base}/schools/{id}`
    fn get_school(&self, id: &str) -> Result<School>;

    /// `GET {base}/schools/search?name={q}`
    fn search_schools(&self, name: &str) -> Result<Vec<SchoolSummary>>;

    /// `GET {base}/schools/{id}/rankings`. A 404 is `FetchError::NotFound`.
    fn get_rankings(&self, id: &str) -> Result<Vec<RankingRecord>>;
}

pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(opts: &ApiOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(opts.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Config(format!("HTTP client: {e}")))?;
        Self::with_client(&opts.base_url, http)
    }

    /// Use a pre-built client (custom proxy/TLS settings, tests).
    pub fn with_client(base_url: &str, http: Client) -> Result<Self> {
        let base = Url::parse(&normalize_base_url(base_url))
            .map_err(|e| FetchError::Config(format!("Invalid API URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::Config(format!("Invalid API URL {base_url:?}")));
        }
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Base + path segments. Each segment is percent-encoded, so opaque ids
    /// containing `/` or spaces stay a single segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Config(format!("Invalid API URL {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T>(&self, url: Url, what: &'static str, soft_404: bool) -> Result<T>
    where
        T: DeserializeOwned,
    {
        logd!("Api: GET {url}");
        let resp = self.http.get(url).send()?;
        let status = resp.status();

        if soft_404 && status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status { what, status: status.as_u16() });
        }
        resp.json::<T>().map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl SchoolApi for ApiClient {
    fn get_school(&self, id: &str) -> Result<School> {
        let url = self.url(&["schools", id])?;
        self.get_json(url, "Failed to fetch school data", false)
    }

    fn search_schools(&self, name: &str) -> Result<Vec<SchoolSummary>> {
        let mut url = self.url(&["schools", "search"])?;
        url.query_pairs_mut().append_pair("name", name);
        self.get_json(url, "Failed to search schools", false)
    }

    fn get_rankings(&self, id: &str) -> Result<Vec<RankingRecord>> {
        let url = self.url(&["schools", id, "rankings"])?;
        self.get_json(url, "Failed to fetch school rankings", true)
    }
}
