//! Raw-response recording under the data directory.
//!
//! Every successful body can be written to
//! `{data_dir}/cache/{endpoint_dir}/{file_key}.json` for later inspection.
//! Nothing here is needed for correctness: there is no eviction, and a
//! missing or corrupt file just means the next call goes to the network.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{
    fmt::Write as _,
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use super::query::QueryParams;


/// File names longer than this get a SHA-256 suffix instead.
const MAX_KEY_LEN: usize = 120;

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Identifies one GET: endpoint plus its query, minus credentials.
#[derive(Debug, Clone, Copy)]
pub struct RequestKey<'a> {
    pub endpoint: &'a str,
    pub query: &'a QueryParams,
}

impl RequestKey<'_> {
    /// First two path segments joined by `_`, e.g. `players/42/matches`
    /// lands in `players_42`.
    pub fn endpoint_dir(&self) -> String {
        let segments: Vec<&str> = self
            .endpoint
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.len() {
            0 => "root".to_string(),
            1 => sanitize(segments[0]),
            _ => sanitize(&segments[..2].join("_")),
        }
    }

    /// Remaining path segments plus the sorted query, flattened into a
    /// file-system safe name. Distinct queries never share a name.
    pub fn to_file_key(&self) -> String {
        let mut parts: Vec<String> = self
            .endpoint
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .skip(2)
            .map(sanitize)
            .collect();

        parts.extend(
            self.query
                .sorted()
                .into_iter()
                .filter(|(k, _)| *k != "api_key")
                .map(|(k, v)| sanitize(&format!("{k}={v}"))),
        );

        if parts.is_empty() {
            return "index".to_string();
        }

        let key = parts.join("_");
        if key.len() <= MAX_KEY_LEN {
            return key;
        }

        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        let prefix: String = key.chars().take(MAX_KEY_LEN - 17).collect();
        format!("{}-{}", prefix, &digest[..16])
    }
}

/// Percent-encode anything outside `[A-Za-z0-9._=-]`, byte by byte.
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'=' | b'.') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Recorded responses rooted at `{data_dir}/cache`.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    root: PathBuf,
}

impl ResponseCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("cache"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: RequestKey<'_>) -> PathBuf {
        self.root
            .join(key.endpoint_dir())
            .join(format!("{}.json", key.to_file_key()))
    }

    /// Previously recorded body, if there is a readable one.
    pub fn load(&self, key: RequestKey<'_>) -> Option<Value> {
        let s = try_read_to_string(&self.path_for(key))?;
        serde_json::from_str(&s).ok()
    }

    /// Write `body` as pretty JSON and return where it went.
    pub fn store(&self, key: RequestKey<'_>, body: &Value) -> std::io::Result<PathBuf> {
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(body)?;
        write_string(&path, &json)?;
        Ok(path)
    }
}
