// API client module: a small blocking HTTP client that talks to the GitHub
// Gists API. One request is in flight at a time; the caller waits for the
// full round-trip before moving on.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::GIST_FILENAME;

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Fixed client-identifying string sent with every request.
pub const CLIENT_USER_AGENT: &str = concat!("gist-sync/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum GistError {
    /// The server answered with something other than 200 OK. `body` holds
    /// the response bytes exactly as received.
    #[error("Status {status}")]
    Status { status: u16, body: Vec<u8> },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Body of `PATCH /gists/{id}`. Only the listed files are touched.
#[derive(Serialize, Debug)]
struct UpdateGistRequest<'a> {
    files: BTreeMap<&'a str, GistFileContent<'a>>,
}

#[derive(Serialize, Debug)]
struct GistFileContent<'a> {
    content: &'a str,
}

/// Serialize the update envelope for `content`:
/// `{"files":{"main.dart":{"content":"..."}}}`.
pub fn update_body(content: &str) -> Result<Vec<u8>, serde_json::Error> {
    let mut files = BTreeMap::new();
    files.insert(GIST_FILENAME, GistFileContent { content });
    serde_json::to_vec(&UpdateGistRequest { files })
}

/// Blocking client for the gist update endpoint. Holds the reqwest client,
/// the API base URL and the Authorization header sent with every call.
#[derive(Clone)]
pub struct GistClient {
    client: Client,
    base_url: String,
    auth: HeaderValue,
}

impl GistClient {
    /// Build a client for `base_url` (trailing slashes are ignored). The
    /// token is turned into a `token <credential>` header once, here.
    pub fn new(base_url: &str, token: &SecretString) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .context("Token is not a valid Authorization header value")?;
        auth.set_sensitive(true);

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GistClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the content of the gist file in gist `gist_id` with `content`.
    ///
    /// Returns `Ok(())` only on HTTP 200. Any other status yields
    /// `GistError::Status` with the drained response body; connection
    /// problems yield `GistError::Transport`.
    pub fn update_gist(&self, gist_id: &str, content: &str) -> Result<(), GistError> {
        let url = format!("{}/gists/{}", self.base_url, gist_id);
        let body = update_body(content)?;

        let res = self
            .client
            .patch(&url)
            .header(AUTHORIZATION, self.auth.clone())
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()?;

        if res.status() != StatusCode::OK {
            let status = res.status().as_u16();
            let body = res.bytes().map(|b| b.to_vec()).unwrap_or_default();
            return Err(GistError::Status { status, body });
        }
        Ok(())
    }
}
