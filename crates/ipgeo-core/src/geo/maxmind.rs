//! MaxMind GeoLite2 / GeoIP2 City database oracle.
//!
//! This product includes GeoLite2 data created by MaxMind, available from
//! <https://www.maxmind.com>.

use async_trait::async_trait;
use maxminddb::{MaxMindDBError, Reader, geoip2};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::{GeoOracle, GeoRecord, OracleError};
use crate::config::{ReaderMode, SkillConfig};

const NAME_LOCALE: &str = "en";

enum Source {
    /// Opened once; the file is treated as immutable for the process
    /// lifetime.
    Shared {
        path: PathBuf,
        reader: Arc<Reader<Vec<u8>>>,
    },
    /// Opened and released inside every lookup.
    PerCall(PathBuf),
}

/// City database oracle backed by the `maxminddb` reader.
pub struct MaxMindOracle {
    source: Source,
}

impl MaxMindOracle {
    /// Open the database once and share the read-only handle.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref().to_path_buf();
        let reader = open_reader(&path)?;
        info!(
            path = %path.display(),
            database_type = %reader.metadata.database_type,
            build_epoch = reader.metadata.build_epoch,
            "Opened geolocation database"
        );
        Ok(Self {
            source: Source::Shared {
                path,
                reader: Arc::new(reader),
            },
        })
    }

    /// Defer opening to each lookup. Nothing is read until the first call.
    pub fn per_call(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::PerCall(path.into()),
        }
    }

    pub fn from_config(config: &SkillConfig) -> Result<Self, OracleError> {
        match config.reader_mode {
            ReaderMode::Shared => Self::open(&config.database_path),
            ReaderMode::PerCall => Ok(Self::per_call(config.database_path.clone())),
        }
    }

    pub fn path(&self) -> &Path {
        match &self.source {
            Source::Shared { path, .. } => path,
            Source::PerCall(path) => path,
        }
    }
}

#[async_trait]
impl GeoOracle for MaxMindOracle {
    async fn lookup(&self, address: &str) -> Result<GeoRecord, OracleError> {
        let address = address.to_string();
        let task = match &self.source {
            Source::Shared { reader, .. } => {
                let reader = Arc::clone(reader);
                tokio::task::spawn_blocking(move || lookup_city(&reader, &address))
            }
            Source::PerCall(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || {
                    // Dropped on every return path, including errors
                    let reader = open_reader(&path)?;
                    lookup_city(&reader, &address)
                })
            }
        };

        task.await
            .map_err(|e| OracleError::Unavailable(format!("lookup task failed: {e}")))?
    }

    async fn health(&self) -> Result<(), OracleError> {
        match &self.source {
            Source::Shared { .. } => Ok(()),
            Source::PerCall(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || open_reader(&path).map(|_| ()))
                    .await
                    .map_err(|e| OracleError::Unavailable(format!("health task failed: {e}")))?
            }
        }
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Shared { path, reader } => format!(
                "maxmind {} ({}, shared)",
                path.display(),
                reader.metadata.database_type
            ),
            Source::PerCall(path) => format!("maxmind {} (per call)", path.display()),
        }
    }
}

fn open_reader(path: &Path) -> Result<Reader<Vec<u8>>, OracleError> {
    Reader::open_readfile(path)
        .map_err(|e| OracleError::Unavailable(format!("{}: {e}", path.display())))
}

fn lookup_city(reader: &Reader<Vec<u8>>, address: &str) -> Result<GeoRecord, OracleError> {
    let ip: IpAddr = address
        .parse()
        .map_err(|_| OracleError::MalformedInput(address.to_string()))?;

    let city: geoip2::City = reader.lookup(ip).map_err(|e| match e {
        MaxMindDBError::AddressNotFoundError(_) => OracleError::NotFound(address.to_string()),
        other => OracleError::Unavailable(other.to_string()),
    })?;

    let record = GeoRecord {
        city: city
            .city
            .as_ref()
            .and_then(|c| localized(c.names.as_ref())),
        subdivision: city
            .subdivisions
            .as_ref()
            .and_then(|subdivisions| subdivisions.last())
            .and_then(|s| localized(s.names.as_ref())),
        country: city
            .country
            .as_ref()
            .and_then(|c| localized(c.names.as_ref())),
    };
    debug!(address, ?record, "Database hit");
    Ok(record)
}

fn localized(names: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    names
        .and_then(|names| names.get(NAME_LOCALE))
        .map(|name| name.to_string())
}
