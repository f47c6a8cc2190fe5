//! Article body rendering: markdown to HTML with anchored headings and a
//! table of contents.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Heading anchors in the GitHub style: lowercase, punctuation dropped,
/// spaces turned into `-`, repeats suffixed `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{}-{}", original, count);
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }
}

pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    /// 2 or 3.
    pub level: u8,
}

impl TocEntry {
    pub fn is_nested(&self) -> bool {
        self.level > 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Render markdown to HTML. Every heading gets a slug id; H2 and H3 headings
/// are listed in the table of contents with the same ids.
pub fn render(markdown: &str) -> Rendered {
    let mut slugger = Slugger::new();
    let mut toc = Vec::new();
    let mut events: Vec<Event<'_>> = Vec::new();
    // (index of the heading's start event, level, collected text)
    let mut heading: Option<(usize, HeadingLevel, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match &event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((events.len(), *level, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, collected)) = heading.as_mut() {
                    collected.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, level, text)) = heading.take() {
                    let id = slugger.slug(&text);
                    if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[start] {
                        *slot = Some(CowStr::from(id.clone()));
                    }
                    let level = level_number(level);
                    if level == 2 || level == 3 {
                        toc.push(TocEntry {
                            id,
                            text: text.trim().to_string(),
                            level,
                        });
                    }
                }
            }
            _ => {}
        }
        events.push(event);
    }

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());
    Rendered { html: output, toc }
}

/// Plain-text preview of a markdown body, at most `max_chars` characters.
///
/// Code blocks and images are left out; whitespace is collapsed.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let mut text = String::new();
    let mut hidden = 0usize;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Start(Tag::Image { .. }) => hidden += 1,
            Event::End(TagEnd::CodeBlock) | Event::End(TagEnd::Image) => {
                hidden = hidden.saturating_sub(1)
            }
            Event::Text(t) | Event::Code(t) if hidden == 0 => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}
