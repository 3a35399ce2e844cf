use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SERVER_SOURCE: &str = "http://localhost:8080";

#[derive(Parser, Debug)]
#[command(name = "romdeck", version, about = "ROM library server CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Server base URL (full URL or host:port shorthand)"
    )]
    pub server: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the platforms known to the server
    Platforms,
    /// List ROMs of one platform, optionally filtered
    Roms {
        platform: String,
        #[arg(long, help = "Substring filter applied server-side")]
        search: Option<String>,
        #[arg(long, help = "Pagination token from a previous page")]
        cursor: Option<String>,
        #[arg(long, default_value_t = 60, help = "Max items per page")]
        size: u32,
    },
    /// Show one ROM's detail
    Show { platform: String, rom_id: u64 },
    /// Download a ROM archive to disk
    Download {
        platform: String,
        rom_id: u64,
        #[arg(long = "file", help = "Restrict the archive to these files (repeatable)")]
        files: Vec<String>,
        #[arg(long, help = "Target directory (default: download_dir from config, else cwd)")]
        output: Option<PathBuf>,
    },
    /// Send a partial update for one ROM
    Update {
        platform: String,
        rom_id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        igdb_id: Option<u64>,
    },
    /// Delete one ROM from the server
    Delete {
        platform: String,
        rom_id: u64,
        #[arg(long, default_value_t = false, help = "Also purge the underlying files")]
        filesystem: bool,
    },
    /// Match one ROM against the external metadata database
    Match {
        platform: String,
        rom_id: u64,
        #[arg(long, help = "Search term (default: the ROM's name)")]
        term: Option<String>,
        #[arg(long, value_enum, default_value_t = SearchBy::Name)]
        by: SearchBy,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    Name,
    Id,
}

impl SearchBy {
    pub fn api_value(self) -> &'static str {
        match self {
            SearchBy::Name => "name",
            SearchBy::Id => "id",
        }
    }
}
