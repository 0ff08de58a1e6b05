use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "skeletal-animations")]
    skeletal_animations: HashMap<String, String>,
    #[serde(rename = "editor-configs", default)]
    editor_configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Skeletal animations: bone groups with keyframed translate/rotate/scale tracks.
pub mod skeletal {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.skeletal_animations.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.skeletal_animations, "skeletal animation", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.skeletal_animations, "skeletal animation", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.skeletal_animations, "skeletal animation", name)?;
        Ok(resolve_path(rel))
    }
}

/// Editor configurations as a host would ship them.
pub mod editor_configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.editor_configs.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.editor_configs, "editor config", name)?;
        read_to_string(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.editor_configs, "editor config", name)?;
        Ok(resolve_path(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves_to_a_file() {
        for key in skeletal::keys() {
            let path = skeletal::path(&key).unwrap();
            assert!(path.is_file(), "missing fixture {}", path.display());
            let value: serde_json::Value = skeletal::load(&key).unwrap();
            assert!(value.get("groups").is_some(), "{key} has no groups");
        }
        for key in editor_configs::keys() {
            assert!(editor_configs::path(&key).unwrap().is_file());
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = skeletal::json("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
    }
}
