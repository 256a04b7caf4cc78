//! Formatting conventions detected from existing JSONC text

use std::collections::BTreeMap;
use std::ops::Range;

use super::parser::Stats;

/// Quote character used for strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    Double,
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
}

/// Line terminator written between generated lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// The terminator used by most lines of `source`.
    fn detect(source: &str) -> Self {
        let lines = source.matches('\n').count();
        let crlf = source.matches("\r\n").count();
        if crlf > lines - crlf { Self::CrLf } else { Self::Lf }
    }
}

/// Formatting metadata captured from a source text and reused when new
/// content has to be rendered into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsoncStyle {
    /// One level of indentation, e.g. two spaces or a tab.
    pub indent: String,
    pub quote: Quote,
    /// Whether object keys are written in quotes.
    pub quote_keys: bool,
    pub line_ending: LineEnding,
}

impl Default for JsoncStyle {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            quote: Quote::Double,
            quote_keys: true,
            line_ending: LineEnding::Lf,
        }
    }
}

impl JsoncStyle {
    pub(crate) fn detect(source: &str, stats: &Stats) -> Self {
        let quote = if stats.single_quoted > stats.double_quoted {
            Quote::Single
        } else {
            Quote::Double
        };
        let quote_keys = stats.bare_keys == 0 || stats.quoted_keys >= stats.bare_keys;

        Self {
            indent: detect_indent(source, &stats.indents).unwrap_or_else(|| Self::default().indent),
            quote,
            quote_keys,
            line_ending: LineEnding::detect(source),
        }
    }
}

/// The most common positive step between consecutive indentations of
/// lines that start with a token.
///
/// Tabs win when more lines are indented with tabs than with spaces.
/// Ties between step widths go to the narrower one.
fn detect_indent(source: &str, indents: &[Range<usize>]) -> Option<String> {
    let mut steps: BTreeMap<usize, usize> = BTreeMap::new();
    let mut tab_lines = 0usize;
    let mut space_lines = 0usize;
    let mut previous = 0usize;

    for range in indents {
        let whitespace = &source[range.clone()];
        if whitespace.starts_with('\t') {
            tab_lines += 1;
        } else if !whitespace.is_empty() {
            space_lines += 1;
        }

        let width = whitespace.len();
        if width > previous {
            *steps.entry(width - previous).or_default() += 1;
        }
        previous = width;
    }

    if tab_lines > space_lines {
        return Some("\t".to_string());
    }

    let mut best: Option<(usize, usize)> = None;
    for (&step, &count) in &steps {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((step, count));
        }
    }
    best.map(|(step, _)| " ".repeat(step))
}
