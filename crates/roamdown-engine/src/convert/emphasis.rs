//! Inline emphasis marker conversion between the two dialects.
//!
//! A single left-to-right scan collects candidate marker tokens of the input
//! dialect, pairs them per kind (a highlight span and an italic span may be
//! open at the same time, so nested spans convert independently), and
//! rewrites only the paired tokens. A marker with no partner of the same
//! kind is emitted verbatim in its original form — content is never dropped.

use super::Direction;

/// `^^highlight^^` / `__italic__` in the source dialect.
pub const SOURCE_HIGHLIGHT: &str = "^^";
pub const SOURCE_ITALIC: &str = "__";

/// `==highlight==` / `*italic*` in the standard dialect.
pub const STANDARD_HIGHLIGHT: &str = "==";
pub const STANDARD_ITALIC: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Highlight,
    Italic,
}

impl MarkerKind {
    fn token(self, direction: Direction, side: Side) -> &'static str {
        let standard = match self {
            MarkerKind::Highlight => STANDARD_HIGHLIGHT,
            MarkerKind::Italic => STANDARD_ITALIC,
        };
        let source = match self {
            MarkerKind::Highlight => SOURCE_HIGHLIGHT,
            MarkerKind::Italic => SOURCE_ITALIC,
        };
        match (direction, side) {
            (Direction::ToStandard, Side::Input) => source,
            (Direction::ToStandard, Side::Output) => standard,
            (Direction::ToSource, Side::Input) => standard,
            (Direction::ToSource, Side::Output) => source,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Input,
    Output,
}

struct MarkerToken {
    start: usize,
    len: usize,
    kind: MarkerKind,
}

/// Converts source-dialect markers to standard markers.
pub fn to_standard(text: &str) -> String {
    convert_markers(text, Direction::ToStandard)
}

/// Converts standard-dialect markers to source markers.
pub fn to_source(text: &str) -> String {
    convert_markers(text, Direction::ToSource)
}

pub fn convert_markers(text: &str, direction: Direction) -> String {
    let tokens = scan_markers(text, direction);
    let paired = pair_markers(&tokens);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&text[pos..token.start]);
        if paired[i] {
            out.push_str(token.kind.token(direction, Side::Output));
        } else {
            out.push_str(&text[token.start..token.start + token.len]);
        }
        pos = token.start + token.len;
    }
    out.push_str(&text[pos..]);
    out
}

/// Applies the marker transform to each text independently, preserving order.
pub fn convert_each<I, S>(texts: I, direction: Direction) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|t| convert_markers(t.as_ref(), direction))
        .collect()
}

fn scan_markers(text: &str, direction: Direction) -> Vec<MarkerToken> {
    let highlight = MarkerKind::Highlight.token(direction, Side::Input);
    let italic = MarkerKind::Italic.token(direction, Side::Input);
    let bytes = text.as_bytes();

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &text[i..];
        if rest.starts_with(highlight) {
            tokens.push(MarkerToken {
                start: i,
                len: highlight.len(),
                kind: MarkerKind::Highlight,
            });
            i += highlight.len();
            continue;
        }
        // In the standard dialect only a lone `*` is an italic marker; `**`
        // and longer runs (bold et al.) are literal text and must be skipped
        // whole so their asterisks never pair up as italics.
        if bytes[i] == b'*' {
            let run = bytes[i..].iter().take_while(|&&b| b == b'*').count();
            if italic == STANDARD_ITALIC && run == 1 {
                tokens.push(MarkerToken {
                    start: i,
                    len: 1,
                    kind: MarkerKind::Italic,
                });
            }
            i += run;
            continue;
        }
        if rest.starts_with(italic) {
            tokens.push(MarkerToken {
                start: i,
                len: italic.len(),
                kind: MarkerKind::Italic,
            });
            i += italic.len();
            continue;
        }
        // Advance one whole character so slicing stays on a UTF-8 boundary.
        i += rest.chars().next().map_or(1, char::len_utf8);
    }
    tokens
}

/// Pairs consecutive tokens of the same kind: first opens, next closes.
/// Tokens left open at end of input stay unpaired.
fn pair_markers(tokens: &[MarkerToken]) -> Vec<bool> {
    let mut paired = vec![false; tokens.len()];
    let mut open: [Option<usize>; 2] = [None, None];

    for (i, token) in tokens.iter().enumerate() {
        let slot = match token.kind {
            MarkerKind::Highlight => 0,
            MarkerKind::Italic => 1,
        };
        match open[slot].take() {
            Some(opener) => {
                paired[opener] = true;
                paired[i] = true;
            }
            None => open[slot] = Some(i),
        }
    }
    paired
}
