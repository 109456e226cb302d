//! `---`-fenced YAML frontmatter on imported markdown files.
//!
//! Only `title` and `tags` are read; `tags` may be a YAML list or a single
//! comma-separated string. A file whose frontmatter fails to parse is
//! treated as having none — the whole content stays markdown, nothing is
//! dropped.

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<Tags>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Csv(String),
}

impl Frontmatter {
    /// Renders tags as a single `#tag` block line, the way imported pages
    /// carry them.
    pub fn tag_line(&self) -> Option<String> {
        let tags: Vec<String> = match &self.tags {
            Some(Tags::List(list)) => list.iter().map(|t| t.trim().to_string()).collect(),
            Some(Tags::Csv(csv)) => csv.split(',').map(|t| t.trim().to_string()).collect(),
            None => return None,
        };
        let tags: Vec<String> = tags.into_iter().filter(|t| !t.is_empty()).collect();
        if tags.is_empty() {
            return None;
        }
        Some(
            tags.iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// Splits fenced frontmatter from the body. Returns `(None, content)` when
/// the content does not open with a `---` fence or the fence never closes.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(after_open) = content.strip_prefix("---\n") else {
        return (None, content);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parses frontmatter off the top of `content`, degrading to "no
/// frontmatter, full content intact" on any parse failure.
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let (yaml, body) = split_frontmatter(content);
    let Some(yaml) = yaml else {
        return (None, body);
    };
    if yaml.trim().is_empty() {
        return (None, body);
    }
    match serde_yaml::from_str::<Frontmatter>(yaml) {
        Ok(frontmatter) => (Some(frontmatter), body),
        Err(error) => {
            warn!(%error, "ignoring unparseable frontmatter");
            (None, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_title_and_body() {
        let content = "---\ntitle: My Page\n---\n- first bullet\n";
        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.unwrap().title.as_deref(), Some("My Page"));
        assert_eq!(body, "- first bullet\n");
    }

    #[test]
    fn content_without_fences_passes_through() {
        let content = "- just bullets\n";
        let (fm, body) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn unclosed_fence_is_not_frontmatter() {
        let content = "---\ntitle: dangling\n- bullet\n";
        let (fm, body) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn tags_as_list() {
        let (fm, _) = parse_frontmatter("---\ntags:\n  - alpha\n  - beta\n---\nbody\n");
        assert_eq!(fm.unwrap().tag_line().as_deref(), Some("#alpha #beta"));
    }

    #[test]
    fn tags_as_comma_string() {
        let (fm, _) = parse_frontmatter("---\ntags: alpha, beta\n---\nbody\n");
        assert_eq!(fm.unwrap().tag_line().as_deref(), Some("#alpha #beta"));
    }

    #[test]
    fn unparseable_yaml_keeps_full_content() {
        let content = "---\n{not: [valid\n---\nbody\n";
        let (fm, body) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn empty_tag_list_yields_no_tag_line() {
        let (fm, _) = parse_frontmatter("---\ntitle: t\ntags: []\n---\nbody\n");
        assert_eq!(fm.unwrap().tag_line(), None);
    }
}
