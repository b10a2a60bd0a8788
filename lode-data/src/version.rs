use std::cmp::Ordering;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("non-numeric version component in \"{0}\"")]
    BadComponent(String),
}

/// A release version such as `1.8.9` or `1.16.4`. The major version is the
/// first two components (`1.16.4` -> `1.16`), which is what bare entries in
/// the feature table match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameVersion {
    text: String,
    major: String,
    parts: Vec<u32>,
}

impl GameVersion {
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let parts = split_parts(text)?;
        let major = match text.match_indices('.').nth(1) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        };
        Ok(Self {
            text: text.to_string(),
            major,
            parts,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn major_version(&self) -> &str {
        &self.major
    }

    /// Numeric comparison against another version string, with missing
    /// trailing components treated as zero (`1.14` == `1.14.0`).
    pub fn compare(&self, other: &str) -> Result<Ordering, VersionError> {
        let other = split_parts(other)?;
        let len = self.parts.len().max(other.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return Ok(ord),
            }
        }
        Ok(Ordering::Equal)
    }
}

fn split_parts(text: &str) -> Result<Vec<u32>, VersionError> {
    if text.is_empty() {
        return Err(VersionError::Empty);
    }
    text.split('.')
        .map(|p| {
            p.parse::<u32>()
                .map_err(|_| VersionError::BadComponent(text.to_string()))
        })
        .collect()
}
