use crate::cli::SearchBy;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Platform {
    pub slug: String,
    #[serde(default)]
    pub fs_slug: String,
    pub name: Option<String>,
    #[serde(default)]
    pub igdb_id: Option<i64>,
    #[serde(default)]
    pub sgdb_id: Option<i64>,
    #[serde(default)]
    pub logo_path: String,
    #[serde(default)]
    pub rom_count: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Rom {
    pub id: u64,
    pub p_slug: String,
    pub r_name: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub igdb_id: Option<u64>,
}

/// Listing parameters for one ROM collection page.
///
/// `cursor` is an opaque token from a previous page; an empty cursor asks for
/// the first page. All three parameters are always sent, so the server sees
/// explicit defaults rather than missing keys.
#[derive(Debug, Clone)]
pub struct RomListQuery {
    pub cursor: String,
    pub size: u32,
    pub search_term: String,
}

impl Default for RomListQuery {
    fn default() -> Self {
        Self {
            cursor: String::new(),
            size: 60,
            search_term: String::new(),
        }
    }
}

impl RomListQuery {
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RomPage {
    #[serde(default)]
    pub items: Vec<Rom>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Partial update payload; only set fields are serialized.
#[derive(Debug, Serialize, Default, Clone)]
pub struct RomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igdb_id: Option<u64>,
}

impl RomPatch {
    pub fn is_empty(&self) -> bool {
        self.r_name.is_none() && self.summary.is_none() && self.igdb_id.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetadataMatch {
    pub igdb_id: u64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StatusMessage {
    pub msg: String,
}

#[derive(Serialize)]
pub struct DownloadReport {
    pub name: String,
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Serialize)]
pub struct MatchReport {
    pub search_term: String,
    pub search_by: SearchBy,
    pub matches: Vec<MetadataMatch>,
}
