use anyhow::Context;
use ascent_core::{Content, MetaProgress};
use std::fs;
use std::path::Path;

pub fn meta_to_json(meta: &MetaProgress) -> anyhow::Result<String> {
    serde_json::to_string_pretty(meta).context("serialize meta progress")
}

/// Corrupt saves are not worth crashing a game over; fall back to a fresh
/// profile with the default unlocks.
pub fn meta_from_json(raw: &str, content: &Content) -> MetaProgress {
    serde_json::from_str(raw).unwrap_or_else(|_| MetaProgress::new_profile(content))
}

pub fn load_meta(path: &Path, content: &Content) -> MetaProgress {
    match fs::read_to_string(path) {
        Ok(raw) => meta_from_json(&raw, content),
        Err(_) => MetaProgress::new_profile(content),
    }
}

pub fn save_meta(path: &Path, meta: &MetaProgress) -> anyhow::Result<()> {
    let raw = meta_to_json(meta)?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn content_to_json(content: &Content) -> anyhow::Result<String> {
    serde_json::to_string_pretty(content).context("serialize content")
}

pub fn content_from_json(raw: &str) -> anyhow::Result<Content> {
    serde_json::from_str(raw).context("parse content")
}

/// Full-catalog override from a JSON file, replacing the built-ins.
pub fn load_content(path: &Path) -> anyhow::Result<Content> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    content_from_json(&raw)
}
