//! Where group lists and group details come from.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::client::{create_http_client, fetch_text};
use super::parser::{parse_group_list, parse_location_records};
use super::types::LoadError;
use crate::types::{GroupDescriptor, LocationRecord};
use crate::TARGET_DATA_LOAD;

/// A provider of group lists and per-group location records.
pub trait GroupSource {
    fn fetch_groups(
        &self,
    ) -> impl Future<Output = Result<Vec<GroupDescriptor>, LoadError>> + Send;

    fn fetch_locations(
        &self,
        group: &GroupDescriptor,
    ) -> impl Future<Output = Result<Vec<LocationRecord>, LoadError>> + Send;
}

/// Loads over HTTP. Paths are resolved against a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
    groups_path: String,
}

impl HttpSource {
    pub fn new(base: Url, groups_path: &str, timeout: Duration) -> Result<Self, LoadError> {
        Ok(Self {
            client: create_http_client(timeout)?,
            base: with_trailing_slash(base),
            groups_path: groups_path.to_string(),
        })
    }

    /// Resolve a group list path or `dataPath` against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|_| LoadError::InvalidAddress(path.to_string()))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

impl GroupSource for HttpSource {
    async fn fetch_groups(&self) -> Result<Vec<GroupDescriptor>, LoadError> {
        let url = self.resolve(&self.groups_path)?;
        let body = fetch_text(&self.client, url.as_str()).await?;
        parse_group_list(&body)
    }

    async fn fetch_locations(
        &self,
        group: &GroupDescriptor,
    ) -> Result<Vec<LocationRecord>, LoadError> {
        let url = self.resolve(&group.data_path)?;
        let body = fetch_text(&self.client, url.as_str()).await?;
        parse_location_records(&body)
    }
}

/// Loads from a local directory. Paths are resolved against the directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    groups_path: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, groups_path: &str) -> Self {
        Self {
            root: root.into(),
            groups_path: groups_path.to_string(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    async fn read(&self, path: &Path) -> Result<String, LoadError> {
        debug!(target: TARGET_DATA_LOAD, "Reading {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

impl GroupSource for DirectorySource {
    async fn fetch_groups(&self) -> Result<Vec<GroupDescriptor>, LoadError> {
        let body = self.read(&self.resolve(&self.groups_path)).await?;
        parse_group_list(&body)
    }

    async fn fetch_locations(
        &self,
        group: &GroupDescriptor,
    ) -> Result<Vec<LocationRecord>, LoadError> {
        let body = self.read(&self.resolve(&group.data_path)).await?;
        parse_location_records(&body)
    }
}

/// Either kind of source, chosen from configuration.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    Directory(DirectorySource),
}

impl Source {
    /// `http(s)://` addresses load over HTTP, anything else is a directory.
    pub fn from_address(
        address: &str,
        groups_path: &str,
        timeout: Duration,
    ) -> Result<Self, LoadError> {
        if address.starts_with("http://") || address.starts_with("https://") {
            let base =
                Url::parse(address).map_err(|_| LoadError::InvalidAddress(address.to_string()))?;
            Ok(Source::Http(HttpSource::new(base, groups_path, timeout)?))
        } else {
            Ok(Source::Directory(DirectorySource::new(address, groups_path)))
        }
    }
}

impl GroupSource for Source {
    async fn fetch_groups(&self) -> Result<Vec<GroupDescriptor>, LoadError> {
        match self {
            Source::Http(source) => source.fetch_groups().await,
            Source::Directory(source) => source.fetch_groups().await,
        }
    }

    async fn fetch_locations(
        &self,
        group: &GroupDescriptor,
    ) -> Result<Vec<LocationRecord>, LoadError> {
        match self {
            Source::Http(source) => source.fetch_locations(group).await,
            Source::Directory(source) => source.fetch_locations(group).await,
        }
    }
}
