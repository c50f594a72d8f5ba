//! Line-oriented clustering text format.
//!
//! One cluster per line:
//!
//! ```text
//! [optional label] : item1 item2 item3 ...
//! ```
//!
//! The line is split on the first `:`; the label and the item list are both
//! trimmed, and items are separated by runs of whitespace. A line without a
//! `:` is read as an unlabeled item list.

use std::fmt;

use crate::item::Item;

/// Separates a cluster label from its items.
pub const LABEL_SEPARATOR: char = ':';

/// One parsed line of the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Trimmed label; empty when the line had none.
    pub label: String,
    pub items: Vec<Item>,
}

/// Parses a single line. Returns `None` for lines without any items.
pub fn parse_line(line: &str) -> Option<Line> {
    let (label, rest) = match line.split_once(LABEL_SEPARATOR) {
        Some((label, rest)) => (label.trim(), rest),
        None => ("", line),
    };

    let items: Vec<Item> = rest.split_whitespace().map(Item::from).collect();
    if items.is_empty() {
        return None;
    }

    Some(Line {
        label: label.to_string(),
        items,
    })
}

/// Parses every line of `text`, skipping lines without items.
pub fn parse(text: &str) -> impl Iterator<Item = Line> + '_ {
    text.lines().enumerate().filter_map(|(n, line)| {
        let parsed = parse_line(line);
        if parsed.is_none() {
            tracing::trace!(line = n + 1, "skipping line without items");
        }
        parsed
    })
}

/// Writes one line of the text format (without a trailing newline).
pub(crate) fn write_line(f: &mut fmt::Formatter<'_>, label: &str, items: &[Item]) -> fmt::Result {
    write!(f, "{}{}", label, LABEL_SEPARATOR)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::as_str).collect()
    }

    #[test]
    fn labeled_line() {
        let line = parse_line("A: 1 2 3 4 5").unwrap();
        assert_eq!(line.label, "A");
        assert_eq!(names(&line.items), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn leading_colon_gives_empty_label() {
        let line = parse_line(":foo bar").unwrap();
        assert_eq!(line.label, "");
        assert_eq!(names(&line.items), vec!["foo", "bar"]);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let line = parse_line("  urls :  http://a  x:y ").unwrap();
        assert_eq!(line.label, "urls");
        assert_eq!(names(&line.items), vec!["http://a", "x:y"]);
    }

    #[test]
    fn whitespace_runs_and_tabs() {
        let line = parse_line("B:\ta   b\t\tc").unwrap();
        assert_eq!(names(&line.items), vec!["a", "b", "c"]);
    }

    #[test]
    fn no_separator_is_unlabeled() {
        let line = parse_line("x y").unwrap();
        assert_eq!(line.label, "");
        assert_eq!(line.items.len(), 2);
    }

    #[test]
    fn empty_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("label:   ").is_none());
        assert!(parse_line(":").is_none());
    }

    #[test]
    fn parse_skips_blank_lines() {
        let lines: Vec<Line> = parse("A: 1 2\n\nB:\nC: 3\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "A");
        assert_eq!(lines[1].label, "C");
    }
}
