//! Markdown toolbar: wrap the selection (or a placeholder) in markup.
//!
//! Positions are character offsets, matching what the browser textarea reports
//! for text without astral characters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    Bold,
    Italic,
    Heading1,
    Heading2,
    Link,
    Image,
    Code,
    BulletList,
    OrderedList,
    Quote,
}

impl Markup {
    pub const ALL: [Markup; 10] = [
        Markup::Bold,
        Markup::Italic,
        Markup::Heading1,
        Markup::Heading2,
        Markup::Link,
        Markup::Image,
        Markup::Code,
        Markup::BulletList,
        Markup::OrderedList,
        Markup::Quote,
    ];

    /// `(before, after, placeholder)`
    fn parts(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Markup::Bold => ("**", "**", "bold text"),
            Markup::Italic => ("*", "*", "italic text"),
            Markup::Heading1 => ("# ", "", "Heading"),
            Markup::Heading2 => ("## ", "", "Heading"),
            Markup::Link => ("[", "](url)", "link text"),
            Markup::Image => ("![", "](url)", "image description"),
            Markup::Code => ("`", "`", "code"),
            Markup::BulletList => ("- ", "", "list item"),
            Markup::OrderedList => ("1. ", "", "list item"),
            Markup::Quote => ("> ", "", "quote"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Markup::Bold => "Bold",
            Markup::Italic => "Italic",
            Markup::Heading1 => "Heading 1",
            Markup::Heading2 => "Heading 2",
            Markup::Link => "Link",
            Markup::Image => "Image",
            Markup::Code => "Code",
            Markup::BulletList => "Bullet list",
            Markup::OrderedList => "Numbered list",
            Markup::Quote => "Quote",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Markup::Bold => "bold",
            Markup::Italic => "italic",
            Markup::Heading1 => "heading1",
            Markup::Heading2 => "heading2",
            Markup::Link => "link",
            Markup::Image => "image",
            Markup::Code => "code",
            Markup::BulletList => "bullet_list",
            Markup::OrderedList => "ordered_list",
            Markup::Quote => "quote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub text: String,
    /// Caret position after the inserted content.
    pub cursor: usize,
}

/// Insert `markup` around `text[start..end]`.
///
/// Out-of-range or reversed selections are clamped.
pub fn apply_markup(text: &str, start: usize, end: usize, markup: Markup) -> Edit {
    let (before, after, placeholder) = markup.parts();
    let len = text.chars().count();
    let end = end.min(len);
    let start = start.min(end);

    let head: String = text.chars().take(start).collect();
    let selected: String = text.chars().skip(start).take(end - start).collect();
    let tail: String = text.chars().skip(end).collect();
    let inner = if selected.is_empty() {
        placeholder.to_string()
    } else {
        selected
    };

    let cursor = start + before.chars().count() + inner.chars().count();
    Edit {
        text: format!("{head}{before}{inner}{after}{tail}"),
        cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_selection() {
        let edit = apply_markup("say hello now", 4, 9, Markup::Bold);
        assert_eq!(edit.text, "say **hello** now");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn inserts_placeholder_at_caret() {
        let edit = apply_markup("ab", 1, 1, Markup::Link);
        assert_eq!(edit.text, "a[link text](url)b");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn line_prefixes_have_no_suffix() {
        let edit = apply_markup("", 0, 0, Markup::OrderedList);
        assert_eq!(edit.text, "1. list item");
        assert_eq!(edit.cursor, 12);
    }

    #[test]
    fn offsets_are_characters_not_bytes() {
        let edit = apply_markup("你好世界", 2, 4, Markup::Italic);
        assert_eq!(edit.text, "你好*世界*");
        assert_eq!(edit.cursor, 5);
    }

    #[test]
    fn selection_is_clamped() {
        let edit = apply_markup("abc", 10, 2, Markup::Code);
        assert_eq!(edit.text, "ab`code`c");
    }

    #[test]
    fn markup_names_parse_from_snake_case() {
        let m: Markup = serde_json::from_str("\"bullet_list\"").unwrap();
        assert_eq!(m, Markup::BulletList);
        assert!(Markup::ALL.iter().all(|m| serde_json::to_string(m).unwrap().contains(m.key())));
    }
}
