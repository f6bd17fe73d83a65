//! Note content parser
//!
//! Decomposes raw Markdown note text into title, body, link lines, and
//! tags. The parser is pure: it never touches the catalog. Resolving a
//! link's target directory to a note id happens in the synchronizer,
//! which drops links whose target is not indexed.

use regex::Regex;

/// A link line extracted from note text.
///
/// `content` is the matched link text, e.g.
/// `[20231028013031](../20231028013031) Some linked note`;
/// `dir_name` is the bracketed directory identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub content: String,
    pub dir_name: String,
}

/// The decomposition of one note's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNote {
    /// Text after the first `# ` line; empty when the note has no title
    pub title: String,
    /// All non-title, non-link, non-tag lines after the title, joined
    /// with `\n`, blank lines preserved
    pub body: String,
    /// Link lines in document order
    pub links: Vec<ParsedLink>,
    /// Tag names in document order, `#` stripped
    pub tags: Vec<String>,
}

/// Line classifier for note text.
///
/// The regexes are compiled once per parser; construct a parser at the
/// top of an operation and reuse it for every note (they are hot paths
/// during sync).
///
/// Tag lines are indented with four or more spaces; a leading run of
/// tabs is accepted as well since older notes used tab indentation.
#[derive(Debug)]
pub struct NoteParser {
    link_re: Regex,
    tag_re: Regex,
}

impl NoteParser {
    pub fn new() -> Self {
        NoteParser {
            // E.g. `* [dir](../dir) title`; the bracket text names the
            // target directory.
            link_re: Regex::new(r"\[(.+)\]\(\.\./(.*?)/?\) (.+)").expect("valid link regex"),
            tag_re: Regex::new(r"^(?: {4,}|\t+)#[a-zA-Z]+").expect("valid tag regex"),
        }
    }

    /// Decompose note text into title, body, links, and tags.
    ///
    /// The title is the first `# `-prefixed line; anything before it is
    /// discarded. Link and tag lines are extracted and excluded from
    /// the body wherever they appear.
    pub fn parse(&self, content: &str) -> ParsedNote {
        let mut note = ParsedNote::default();
        let mut body_lines: Vec<&str> = Vec::new();
        let mut in_body = false;

        for line in content.lines() {
            if !in_body && note.title.is_empty() {
                if let Some(title) = line.strip_prefix("# ") {
                    note.title = title.to_string();
                    in_body = true;
                    continue;
                }
            }

            if let Some(m) = self.link_re.captures(line) {
                note.links.push(ParsedLink {
                    content: m.get(0).expect("whole match").as_str().to_string(),
                    dir_name: m.get(1).expect("dir capture").as_str().to_string(),
                });
                continue;
            }

            if self.tag_re.is_match(line) {
                for token in line.split_whitespace() {
                    if let Some(tag) = token.strip_prefix('#') {
                        if !tag.is_empty() {
                            note.tags.push(tag.to_string());
                        }
                    }
                    // Tokens without a leading `#` are not tags.
                }
                continue;
            }

            if in_body {
                body_lines.push(line);
            }
        }

        note.body = body_lines.join("\n");
        note
    }

    /// Whether a single line is a link line.
    pub fn is_link_line(&self, line: &str) -> bool {
        self.link_re.is_match(line)
    }

    /// Whether a single line is a tag line.
    pub fn is_tag_line(&self, line: &str) -> bool {
        self.tag_re.is_match(line)
    }

    /// The target directory named by a link line, if it is one.
    pub fn link_target(&self, line: &str) -> Option<String> {
        self.link_re
            .captures(line)
            .map(|m| m.get(1).expect("dir capture").as_str().to_string())
    }
}

impl Default for NoteParser {
    fn default() -> Self {
        Self::new()
    }
}
