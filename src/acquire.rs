use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;

use crate::{
    assets::index::{IconIndex, IndexEntry},
    assets::loader::read_svg_text,
    config::ShowcaseConfig,
    convert::SvgConverter,
    foundation::error::{ShowcaseError, ShowcaseResult},
    foundation::math::content_hash_hex,
    net::Transport,
};

/// Make sure converted icons exist locally and return their paths in source order.
///
/// A present, non-empty index short-circuits everything unless `refresh` is set. Otherwise
/// each source is fetched and converted. Sources the server answers with an error status, or
/// that the converter rejects, are logged and left out; other failures abort the run.
#[tracing::instrument(skip_all, fields(sources = cfg.icon_sources.len(), refresh = refresh))]
pub fn acquire_icons(
    cfg: &ShowcaseConfig,
    transport: &dyn Transport,
    converter: &dyn SvgConverter,
    refresh: bool,
) -> ShowcaseResult<Vec<PathBuf>> {
    if !refresh
        && let Some(index) = cached_index(&cfg.icon_dir, &cfg.index_file)
    {
        tracing::info!(
            icons = index.len(),
            index = %cfg.index_file.display(),
            "reusing converted icons"
        );
        return Ok(index.paths());
    }

    std::fs::create_dir_all(&cfg.icon_dir)
        .with_context(|| format!("create icon dir '{}'", cfg.icon_dir.display()))?;

    tracing::info!("loading svg content");
    let mut index = IconIndex::default();
    let total = cfg.icon_sources.len();
    for (i, source) in cfg.icon_sources.iter().enumerate() {
        let name = leaf_file_name(source);
        let svg = match read_svg_text(source, transport) {
            Ok(svg) => svg,
            Err(ShowcaseError::HttpStatus { url, status }) => {
                tracing::warn!(
                    file = %name,
                    status,
                    url = %url,
                    "svg download failed, skipping icon"
                );
                continue;
            }
            Err(err) => return Err(err),
        };

        match converter.convert(transport, &svg) {
            Ok(bytes) => {
                let path = cfg.icon_dir.join(&name);
                std::fs::write(&path, &bytes)
                    .with_context(|| format!("write icon '{}'", path.display()))?;
                index.push(IndexEntry {
                    source: source.clone(),
                    path,
                    content_hash: content_hash_hex(svg.as_bytes()),
                    fetched_at_unix: unix_now(),
                });
                tracing::info!(file = %name, "converted and saved");

                if i + 1 < total {
                    pace(cfg.pace());
                }
            }
            Err(ShowcaseError::Conversion { status, body }) => {
                tracing::warn!(
                    file = %name,
                    status,
                    body = %body,
                    "conversion failed, skipping icon"
                );
            }
            Err(err) => return Err(err),
        }
    }

    index.save(&cfg.index_file)?;
    tracing::info!(
        icons = index.len(),
        index = %cfg.index_file.display(),
        "wrote icon index"
    );
    Ok(index.paths())
}

fn cached_index(icon_dir: &Path, index_file: &Path) -> Option<IconIndex> {
    if !icon_dir.is_dir() {
        return None;
    }
    match IconIndex::load(index_file) {
        Ok(Some(index)) if !index.is_empty() => Some(index),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable icon index");
            None
        }
    }
}

/// Local file name for a source: its last path segment with the extension swapped for `.png`.
pub fn leaf_file_name(source: &str) -> String {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    let leaf = path
        .rsplit(['/', '\\'])
        .find(|s| !s.is_empty())
        .unwrap_or("icon");

    let lower = leaf.to_ascii_lowercase();
    match lower.strip_suffix(".svg") {
        Some(stem) if !stem.is_empty() => format!("{}.png", &leaf[..stem.len()]),
        _ => format!("{leaf}.png"),
    }
}

pub(crate) fn pace(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../tests/unit/acquire.rs"]
mod tests;
