use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::ScrollResult;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserPicture {
    pub large: String,
}

/// One entry of the remote user-directory response.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteUser {
    pub name: UserName,
    pub picture: UserPicture,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct UserListResponse {
    pub results: Vec<RemoteUser>,
}

/// A user in the application's own representation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NormalizedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

impl RemoteUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name.first.trim(), self.name.last.trim())
            .trim()
            .to_string()
    }

    pub fn normalize(&self, id: impl Into<String>) -> NormalizedUser {
        NormalizedUser {
            id: id.into(),
            name: self.display_name(),
            email: self.email.clone(),
            picture: self.picture.large.clone(),
        }
    }
}

impl UserListResponse {
    pub fn from_json_str(raw: &str) -> ScrollResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load_file(path: &Path) -> ScrollResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Map every entry in order; ids count up from `start`.
    pub fn normalize(&self, start: usize) -> Vec<NormalizedUser> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, user)| user.normalize((start + i).to_string()))
            .collect()
    }

    /// Normalize the `limit` entries beginning at `offset`, keeping absolute ids.
    pub fn normalize_page(&self, offset: usize, limit: usize) -> Vec<NormalizedUser> {
        self.results
            .iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(i, user)| user.normalize(i.to_string()))
            .collect()
    }
}
