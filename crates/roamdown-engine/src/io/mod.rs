//! File ingestion: markdown (with optional frontmatter) or page JSON, both
//! landing in the [`Page`] schema.

pub mod frontmatter;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::page::{Block, Page};
use crate::parsing;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid page JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Json,
    Markdown,
}

pub fn detect_kind(path: &Path) -> InputKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => InputKind::Json,
        _ => InputKind::Markdown,
    }
}

/// Loads a page from disk, dispatching on file extension.
pub fn load_page(path: &Path) -> Result<Page, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let kind = detect_kind(path);
    debug!(path = %path.display(), ?kind, "loading page");

    match kind {
        InputKind::Json => page_from_json_str(&content).map_err(|source| IoError::Json {
            path: path.to_path_buf(),
            source,
        }),
        InputKind::Markdown => {
            let fallback_title = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("Untitled");
            Ok(page_from_markdown_str(&content, fallback_title))
        }
    }
}

pub fn page_from_json_str(content: &str) -> Result<Page, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn page_to_json_string(page: &Page) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(page)
}

/// Builds a [`Page`] from standard-dialect markdown.
///
/// The title comes from frontmatter, else a leading `# ` heading, else
/// `fallback_title` (typically the file stem). Frontmatter tags become a
/// leading `#tag` block.
pub fn page_from_markdown_str(content: &str, fallback_title: &str) -> Page {
    let (fm, body) = frontmatter::parse_frontmatter(content);

    let mut title = fm.as_ref().and_then(|f| f.title.clone());
    let body = if title.is_none() {
        let (heading, rest) = take_leading_heading(body);
        title = heading.map(str::to_string);
        rest
    } else {
        body
    };

    let mut blocks = Vec::new();
    if let Some(tag_line) = fm.as_ref().and_then(|f| f.tag_line()) {
        blocks.push(Block {
            block_text: tag_line,
            block_children: Vec::new(),
        });
    }
    blocks.extend(parsing::parse_markdown(body).iter().map(Block::from_outline));

    Page::new(title.unwrap_or_else(|| fallback_title.to_string()), blocks)
}

fn take_leading_heading(body: &str) -> (Option<&str>, &str) {
    let body = body.trim_start_matches(['\n', '\r']);
    let Some(rest) = body.strip_prefix("# ") else {
        return (None, body);
    };
    match rest.split_once('\n') {
        Some((heading, remainder)) => (Some(heading.trim_end()), remainder),
        None => (Some(rest.trim_end()), ""),
    }
}
