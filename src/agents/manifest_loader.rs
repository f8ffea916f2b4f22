use crate::config::Config;
use crate::error::{NpmUpdateError, Result};
use crate::utils::logging::verbose;
use serde_json::{Map, Value};
use std::fs;

/// Name to version specifier, in manifest order.
pub type DependencyMap = Map<String, Value>;

/// In-memory manifest together with the exact bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub raw: Vec<u8>,
    pub document: Value,
}

impl Manifest {
    pub fn parse(raw: Vec<u8>) -> Result<Self> {
        let document = serde_json::from_slice(&raw)
            .map_err(|e| NpmUpdateError::ManifestParse(e.to_string()))?;
        Ok(Self { raw, document })
    }

    pub fn dependencies(&self) -> DependencyMap {
        self.section("dependencies")
    }

    pub fn dev_dependencies(&self) -> DependencyMap {
        self.section("devDependencies")
    }

    /// Missing or non-object sections read as empty.
    fn section(&self, key: &str) -> DependencyMap {
        self.document
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

/// ManifestLoader reads `package.json` from the project directory
pub struct ManifestLoader<'a> {
    config: &'a Config,
}

impl<'a> ManifestLoader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn load(&self) -> Result<Manifest> {
        let path = self.config.manifest_path();
        verbose(self.config.verbose, format!("Reading {}", path.display()));

        let raw = fs::read(&path).map_err(|e| {
            NpmUpdateError::ManifestRead(format!("'{}': {}", path.display(), e))
        })?;

        Manifest::parse(raw)
    }
}
