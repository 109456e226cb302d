//! Leading task-marker rewriting: `[]` / `[x]` in standard text map to
//! `{{[[TODO]]}}` / `{{[[DONE]]}}` in the source dialect. Only a leading
//! (post-indent) marker is rewritten; occurrences elsewhere in the line are
//! ordinary text.

use super::Direction;

pub const SOURCE_TODO: &str = "{{[[TODO]]}}";
pub const SOURCE_DONE: &str = "{{[[DONE]]}}";
pub const STANDARD_TODO: &str = "[]";
pub const STANDARD_DONE: &str = "[x]";

pub fn convert_task_marker(text: &str, direction: Direction) -> String {
    let (todo_in, done_in, todo_out, done_out) = match direction {
        Direction::ToSource => (STANDARD_TODO, STANDARD_DONE, SOURCE_TODO, SOURCE_DONE),
        Direction::ToStandard => (SOURCE_TODO, SOURCE_DONE, STANDARD_TODO, STANDARD_DONE),
    };

    replace_leading(text, todo_in, todo_out)
        .or_else(|| replace_leading(text, done_in, done_out))
        .unwrap_or_else(|| text.to_string())
}

fn replace_leading(text: &str, from: &str, to: &str) -> Option<String> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with(from) {
        return None;
    }
    let indent = &text[..text.len() - trimmed.len()];
    Some(format!("{indent}{to}{}", &trimmed[from.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[] buy milk", "{{[[TODO]]}} buy milk")]
    #[case("[x] shipped", "{{[[DONE]]}} shipped")]
    #[case("  [] indented", "  {{[[TODO]]}} indented")]
    #[case("no marker here", "no marker here")]
    #[case("middle [] is untouched", "middle [] is untouched")]
    fn to_source_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_task_marker(input, Direction::ToSource), expected);
    }

    #[rstest]
    #[case("{{[[TODO]]}} buy milk", "[] buy milk")]
    #[case("{{[[DONE]]}} shipped", "[x] shipped")]
    fn to_standard_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_task_marker(input, Direction::ToStandard), expected);
    }

    #[test]
    fn round_trip() {
        let original = "[] buy milk";
        let source = convert_task_marker(original, Direction::ToSource);
        assert_eq!(convert_task_marker(&source, Direction::ToStandard), original);
    }
}
