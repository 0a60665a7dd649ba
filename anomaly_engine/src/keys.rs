use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

pub const PLAYHT_KEY_NAME: &str = "PlayHT_API_Key";
pub const PLAYHT_USER_NAME: &str = "PLAYHT_User_ID";
pub const OPENAI_KEY_NAME: &str = "NAHRS_API_Key";

/// Credentials for the two speech providers and the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pub playht_api_key: String,
    pub playht_user_id: String,
    pub openai_api_key: String,
}

#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("reading key collection {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("compiling key collection pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("key collection {path} is missing entry {name}")]
    MissingEntry { path: PathBuf, name: &'static str },
}

/// Reads the local XML key collection: `<ApiKey name="...">` elements
/// each wrapping a `<Key>` text node. The file schema is small and fixed,
/// so a capture pass is all the parsing it needs.
pub fn load_api_keys(path: &Path) -> Result<ApiKeys, KeyFileError> {
    let contents = fs::read_to_string(path).map_err(|source| KeyFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let pattern = Regex::new(r#"(?s)<ApiKey\s+name="([^"]+)"[^>]*>.*?<Key>([^<]*)</Key>"#)?;

    let mut playht_api_key = None;
    let mut playht_user_id = None;
    let mut openai_api_key = None;
    for caps in pattern.captures_iter(&contents) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let key = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        match name {
            PLAYHT_KEY_NAME => playht_api_key = Some(key),
            PLAYHT_USER_NAME => playht_user_id = Some(key),
            OPENAI_KEY_NAME => openai_api_key = Some(key),
            _ => {}
        }
    }

    let missing = |name| KeyFileError::MissingEntry {
        path: path.to_path_buf(),
        name,
    };
    Ok(ApiKeys {
        playht_api_key: playht_api_key.ok_or_else(|| missing(PLAYHT_KEY_NAME))?,
        playht_user_id: playht_user_id.ok_or_else(|| missing(PLAYHT_USER_NAME))?,
        openai_api_key: openai_api_key.ok_or_else(|| missing(OPENAI_KEY_NAME))?,
    })
}
