// Client for the ROM library server REST API.
// Public surface:
//   - LibraryClient: one typed method per endpoint
//   - ApiError: transport/status/decode taxonomy
//
// Every operation is a single stateless round trip; failures are returned to
// the caller, never swallowed. URL encoding is owned here: path segments and
// query pairs go through the URL builder, callers pass raw strings.

use std::io::Write;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cli::SearchBy;
use crate::domain::models::{MetadataMatch, Platform, Rom, RomListQuery, RomPage, RomPatch, StatusMessage};

const USER_AGENT: &str = concat!("romdeck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

pub struct LibraryClient {
    http: Client,
    base: Url,
}

impl LibraryClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base })
    }

    pub fn list_platforms(&self) -> Result<Vec<Platform>, ApiError> {
        let url = self.endpoint(&["api", "platforms"])?;
        tracing::debug!("GET {url}");
        decode(ensure_success(self.http.get(url).send()?)?)
    }

    pub fn list_roms(&self, platform: &str, query: &RomListQuery) -> Result<RomPage, ApiError> {
        let url = self.roms_url(platform, query)?;
        tracing::debug!("GET {url}");
        decode(ensure_success(self.http.get(url).send()?)?)
    }

    pub fn get_rom(&self, platform: &str, id: u64) -> Result<Rom, ApiError> {
        let url = self.endpoint(&["api", "platforms", platform, "roms", &id.to_string()])?;
        tracing::debug!("GET {url}");
        decode(ensure_success(self.http.get(url).send()?)?)
    }

    /// Stream the ROM archive into `dest`, returning the byte count.
    ///
    /// With `files = None` the request falls back to the ROM's own file set;
    /// an explicit slice overrides it. An empty effective set sends no
    /// `files` parameter and the server picks the full archive.
    pub fn download_rom<W: Write>(
        &self,
        rom: &Rom,
        files: Option<&[String]>,
        dest: &mut W,
    ) -> Result<u64, ApiError> {
        let url = self.download_url(rom, files)?;
        tracing::debug!("GET {url}");
        let mut resp = ensure_success(self.http.get(url).send()?)?;
        Ok(resp.copy_to(dest)?)
    }

    pub fn update_rom(&self, platform: &str, id: u64, patch: &RomPatch) -> Result<Rom, ApiError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            #[serde(rename = "updatedRom")]
            updated_rom: &'a RomPatch,
        }

        let url = self.endpoint(&["api", "platforms", platform, "roms", &id.to_string()])?;
        tracing::debug!("PATCH {url}");
        let resp = self
            .http
            .patch(url)
            .json(&Envelope { updated_rom: patch })
            .send()?;
        decode(ensure_success(resp)?)
    }

    pub fn delete_rom(
        &self,
        platform: &str,
        id: u64,
        delete_from_filesystem: bool,
    ) -> Result<StatusMessage, ApiError> {
        let url = self.delete_url(platform, id, delete_from_filesystem)?;
        tracing::debug!("DELETE {url}");
        decode(ensure_success(self.http.delete(url).send()?)?)
    }

    /// Ask the server to match `rom` against the external metadata database.
    pub fn match_metadata(
        &self,
        search_term: &str,
        search_by: SearchBy,
        rom: &Rom,
    ) -> Result<Vec<MetadataMatch>, ApiError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            rom: &'a Rom,
        }

        let mut url = self.endpoint(&["api", "search", "roms", "igdb"])?;
        url.query_pairs_mut()
            .append_pair("search_term", search_term)
            .append_pair("search_by", search_by.api_value());
        tracing::debug!("PUT {url}");
        let resp = self.http.put(url).json(&Envelope { rom }).send()?;
        decode(ensure_success(resp)?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(None);
        Ok(url)
    }

    fn roms_url(&self, platform: &str, query: &RomListQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", "platforms", platform, "roms"])?;
        url.query_pairs_mut()
            .append_pair("cursor", &query.cursor)
            .append_pair("size", &query.size.to_string())
            .append_pair("search_term", &query.search_term);
        Ok(url)
    }

    fn download_url(&self, rom: &Rom, files: Option<&[String]>) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&[
            "api",
            "platforms",
            &rom.p_slug,
            "roms",
            &rom.id.to_string(),
            "download",
        ])?;
        let effective = files.unwrap_or(&rom.files);
        if !effective.is_empty() {
            url.query_pairs_mut()
                .append_pair("files", &effective.join(","));
        }
        Ok(url)
    }

    fn delete_url(&self, platform: &str, id: u64, filesystem: bool) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", "platforms", platform, "roms", &id.to_string()])?;
        url.query_pairs_mut()
            .append_pair("filesystem", if filesystem { "true" } else { "false" });
        Ok(url)
    }
}

fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        tracing::warn!("http status {} for {}", status.as_u16(), resp.url());
        Err(ApiError::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let url = resp.url().to_string();
    resp.json()
        .map_err(|e| ApiError::Decode(format!("{url}: {e}")))
}
