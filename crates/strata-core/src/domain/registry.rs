//! Module registration engine.
//!
//! Inserts a module identifier into the `INSTALLED_APPS = [ ... ]` list of a
//! settings file. The file is hand-editable source, so it is treated as text:
//! the list is located with a pattern match and patched in a single window.
//! Nothing outside the brackets is ever rewritten.
//!
//! ```text
//! INSTALLED_APPS = [              <- marker + opening bracket (regex)
//!     'django.contrib.admin',     <- items: quoted literals at depth 1
//!     'rest_framework',  # [x]    <- comments skipped, brackets in them ignored
//!     'modules.orders',           <- inserted line, indentation of the line above
//! ]                               <- first bracket that balances the opening one
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Name of the list holding registered modules.
pub const REGISTRY_MARKER: &str = "INSTALLED_APPS";

const DEFAULT_INDENT: &str = "    ";
const DEFAULT_QUOTE: char = '\'';

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^[ \t]*{REGISTRY_MARKER}\s*=\s*\[")).unwrap()
});

/// What [`register`] did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// The entry was appended to the list.
    Inserted,
    /// The list already holds the entry; nothing changed.
    AlreadyRegistered,
    /// No registry list in the document; nothing changed.
    ListNotFound,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub document: String,
    pub outcome: RegistrationOutcome,
}

impl Registration {
    fn unchanged(document: &str, outcome: RegistrationOutcome) -> Self {
        Self {
            document: document.to_owned(),
            outcome,
        }
    }

    /// Whether the document differs from the input.
    pub fn changed(&self) -> bool {
        self.outcome == RegistrationOutcome::Inserted
    }
}

/// Register `entry` (e.g. `modules.orders`) in the first registry list of
/// `document`.
///
/// Idempotent: registering the same entry twice yields the document of the
/// first call and [`RegistrationOutcome::AlreadyRegistered`].
pub fn register(document: &str, entry: &str) -> Registration {
    let Some(list) = RegistryList::locate(document) else {
        return Registration::unchanged(document, RegistrationOutcome::ListNotFound);
    };

    if list.contains(entry) {
        return Registration::unchanged(document, RegistrationOutcome::AlreadyRegistered);
    }

    Registration {
        document: list.insert(entry),
        outcome: RegistrationOutcome::Inserted,
    }
}

/// A quoted literal found directly inside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub value: &'a str,
    pub quote: char,
}

/// The located registry list inside a document.
///
/// `open` is the byte offset right after `[`, `close` the offset of the
/// matching `]`.
#[derive(Debug, Clone)]
pub struct RegistryList<'a> {
    document: &'a str,
    open: usize,
    close: usize,
    items: Vec<ListItem<'a>>,
    /// Offset just past the last non-comment, non-whitespace byte in the list.
    last_code_end: Option<usize>,
}

impl<'a> RegistryList<'a> {
    /// Find the first registry list. `None` if the marker is missing or the
    /// list is never closed.
    pub fn locate(document: &'a str) -> Option<Self> {
        let open = MARKER.find(document)?.end();
        scan(document, open)
    }

    /// Text strictly between the brackets.
    pub fn inner(&self) -> &'a str {
        &self.document[self.open..self.close]
    }

    pub fn items(&self) -> &[ListItem<'a>] {
        &self.items
    }

    /// Exact match against whole quoted items, never a substring search.
    pub fn contains(&self, entry: &str) -> bool {
        self.items.iter().any(|item| item.value == entry)
    }

    fn insert(&self, entry: &str) -> String {
        let doc = self.document;
        let quote = self.items.last().map_or(DEFAULT_QUOTE, |item| item.quote);
        let line = format!("{quote}{entry}{quote},");
        let eol = self.line_ending();

        let mut out = String::with_capacity(doc.len() + line.len() + DEFAULT_INDENT.len() + 5);
        out.push_str(&doc[..self.open]);

        if self.inner().trim().is_empty() {
            out.push_str(eol);
            out.push_str(DEFAULT_INDENT);
            out.push_str(&line);
            out.push_str(eol);
            out.push_str(&doc[self.close..]);
            return out;
        }

        let content_end = self.open + self.inner().trim_end().len();
        let tail = &doc[content_end..self.close];

        match self.last_code_end {
            Some(end) if !doc[..end].ends_with(',') => {
                out.push_str(&doc[self.open..end]);
                out.push(',');
                out.push_str(&doc[end..content_end]);
            }
            _ => out.push_str(&doc[self.open..content_end]),
        }

        out.push_str(eol);
        out.push_str(self.indentation(content_end));
        out.push_str(&line);

        if tail.contains('\n') {
            out.push_str(tail);
        } else {
            out.push_str(eol);
        }
        out.push_str(&doc[self.close..]);
        out
    }

    /// `\r\n` when the document already uses it, `\n` otherwise.
    fn line_ending(&self) -> &'static str {
        if self.document.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Leading whitespace of the last line holding list content, or the
    /// default when everything sits on the opening line.
    fn indentation(&self, content_end: usize) -> &'a str {
        let head = &self.document[self.open..content_end];
        match head.rfind('\n') {
            Some(newline) => {
                let line = &head[newline + 1..];
                let width = line.len() - line.trim_start_matches([' ', '\t']).len();
                &line[..width]
            }
            None => DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Code,
    Comment,
    Str {
        quote: char,
        start: usize,
        escaped: bool,
    },
}

/// Walk from just after `[` to the bracket that balances it, collecting
/// depth-1 string items. Brackets inside strings and comments don't count.
fn scan(document: &str, open: usize) -> Option<RegistryList<'_>> {
    let mut depth = 1usize;
    let mut items = Vec::new();
    let mut last_code_end = None;
    let mut state = State::Code;

    for (offset, c) in document[open..].char_indices() {
        let at = open + offset;
        state = match state {
            State::Code => match c {
                '#' => State::Comment,
                '\'' | '"' => State::Str {
                    quote: c,
                    start: at,
                    escaped: false,
                },
                ']' if depth == 1 => {
                    return Some(RegistryList {
                        document,
                        open,
                        close: at,
                        items,
                        last_code_end,
                    });
                }
                _ => {
                    match c {
                        '[' => depth += 1,
                        ']' => depth -= 1,
                        _ => {}
                    }
                    if !c.is_whitespace() {
                        last_code_end = Some(at + c.len_utf8());
                    }
                    State::Code
                }
            },
            State::Comment if c == '\n' => State::Code,
            State::Comment => State::Comment,
            State::Str { quote, start, escaped } => {
                if escaped {
                    State::Str {
                        quote,
                        start,
                        escaped: false,
                    }
                } else if c == '\\' {
                    State::Str {
                        quote,
                        start,
                        escaped: true,
                    }
                } else if c == quote {
                    if depth == 1 {
                        items.push(ListItem {
                            value: &document[start + 1..at],
                            quote,
                        });
                    }
                    last_code_end = Some(at + 1);
                    State::Code
                } else if c == '\n' {
                    // unterminated single-line literal
                    State::Code
                } else {
                    State::Str {
                        quote,
                        start,
                        escaped: false,
                    }
                }
            }
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "\
import os

INSTALLED_APPS = [
    'django.contrib.admin',
    'rest_framework',
]

MIDDLEWARE = [
    'django.middleware.security.SecurityMiddleware',
]
";

    fn assert_only_inside_brackets(before: &str, after: &str) {
        let list = RegistryList::locate(before).unwrap();
        let prefix = &before[..list.open];
        let suffix = &before[list.close..];
        assert!(after.starts_with(prefix), "prefix changed:\n{after}");
        assert!(after.ends_with(suffix), "suffix changed:\n{after}");
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn empty_list_receives_single_line() {
        let doc = "INSTALLED_APPS = []\n";
        let result = register(doc, "billing");

        assert_eq!(result.outcome, RegistrationOutcome::Inserted);
        assert_eq!(result.document, "INSTALLED_APPS = [\n    'billing',\n]\n");
        assert_eq!(
            result.document.lines().filter(|l| l.contains("billing")).count(),
            1
        );
    }

    #[test]
    fn present_entry_is_left_alone() {
        let doc = "INSTALLED_APPS = [\"auth\",\n    \"billing\",\n]\n";
        let result = register(doc, "auth");

        assert_eq!(result.outcome, RegistrationOutcome::AlreadyRegistered);
        assert_eq!(result.document, doc);
    }

    #[test]
    fn missing_marker_is_reported() {
        let doc = "DEBUG = True\nMIDDLEWARE = []\n";
        let result = register(doc, "orders");

        assert_eq!(result.outcome, RegistrationOutcome::ListNotFound);
        assert_eq!(result.document, doc);
    }

    // ── properties ────────────────────────────────────────────────────────

    #[test]
    fn registering_twice_is_idempotent() {
        let once = register(BASE, "modules.orders");
        let twice = register(&once.document, "modules.orders");

        assert_eq!(once.outcome, RegistrationOutcome::Inserted);
        assert_eq!(twice.outcome, RegistrationOutcome::AlreadyRegistered);
        assert_eq!(twice.document, once.document);
        assert!(once.changed());
        assert!(!twice.changed());
    }

    #[test]
    fn insertion_only_touches_list_interior() {
        let result = register(BASE, "modules.orders");
        assert_only_inside_brackets(BASE, &result.document);
        assert!(result.document.contains(
            "    'rest_framework',\n    'modules.orders',\n]\n\nMIDDLEWARE"
        ));
    }

    #[test]
    fn prefix_of_existing_entry_is_not_a_match() {
        let doc = "INSTALLED_APPS = [\n    'foobar',\n]\n";
        let result = register(doc, "foo");

        assert_eq!(result.outcome, RegistrationOutcome::Inserted);
        assert_eq!(result.document, "INSTALLED_APPS = [\n    'foobar',\n    'foo',\n]\n");
    }

    #[test]
    fn dotted_suffix_is_not_a_match() {
        let doc = "INSTALLED_APPS = ['modules.orders_archive']\n";
        assert_eq!(
            register(doc, "modules.orders").outcome,
            RegistrationOutcome::Inserted
        );
    }

    // ── list location ─────────────────────────────────────────────────────

    #[test]
    fn only_first_list_is_modified() {
        let doc = "INSTALLED_APPS = [\n    'a',\n]\nINSTALLED_APPS = [\n    'a',\n]\n";
        let result = register(doc, "b");

        assert_eq!(
            result.document,
            "INSTALLED_APPS = [\n    'a',\n    'b',\n]\nINSTALLED_APPS = [\n    'a',\n]\n"
        );
    }

    #[test]
    fn similarly_named_lists_are_ignored() {
        let doc = "MY_INSTALLED_APPS = []\n# INSTALLED_APPS = []\nINSTALLED_APPS = [\n    'a',\n]\n";
        let result = register(doc, "b");

        assert!(result.document.starts_with("MY_INSTALLED_APPS = []\n# INSTALLED_APPS = []\n"));
        assert!(result.document.ends_with("    'a',\n    'b',\n]\n"));
    }

    #[test]
    fn unrelated_list_after_registry_is_untouched() {
        let result = register(BASE, "modules.orders");
        assert!(result.document.ends_with(
            "MIDDLEWARE = [\n    'django.middleware.security.SecurityMiddleware',\n]\n"
        ));
    }

    #[test]
    fn unterminated_list_is_not_found() {
        let doc = "INSTALLED_APPS = [\n    'a',\n";
        assert_eq!(register(doc, "b").outcome, RegistrationOutcome::ListNotFound);
    }

    #[test]
    fn brackets_in_comments_and_strings_do_not_close_list() {
        let doc = "INSTALLED_APPS = [\n    'a]',  # see [docs]\n]\nOTHER = ['x']\n";
        let list = RegistryList::locate(doc).unwrap();
        assert_eq!(list.inner(), "\n    'a]',  # see [docs]\n");

        let result = register(doc, "b");
        assert_eq!(
            result.document,
            "INSTALLED_APPS = [\n    'a]',  # see [docs]\n    'b',\n]\nOTHER = ['x']\n"
        );
    }

    #[test]
    fn commented_out_items_are_not_registered_items() {
        let doc = "INSTALLED_APPS = [\n    'a',\n    # 'b',\n]\n";
        let result = register(doc, "b");

        assert_eq!(result.outcome, RegistrationOutcome::Inserted);
        assert_eq!(
            result.document,
            "INSTALLED_APPS = [\n    'a',\n    # 'b',\n    'b',\n]\n"
        );
    }

    // ── formatting inference ──────────────────────────────────────────────

    #[test]
    fn missing_trailing_comma_is_added() {
        let doc = "INSTALLED_APPS = [\n\t\"a\",\n\t\"b\"\n]\n";
        let result = register(doc, "c");

        assert_eq!(result.document, "INSTALLED_APPS = [\n\t\"a\",\n\t\"b\",\n\t\"c\",\n]\n");
    }

    #[test]
    fn comma_goes_before_trailing_comment() {
        let doc = "INSTALLED_APPS = [\n    'a'  # first\n]\n";
        let result = register(doc, "b");

        assert_eq!(
            result.document,
            "INSTALLED_APPS = [\n    'a',  # first\n    'b',\n]\n"
        );
    }

    #[test]
    fn single_line_list_breaks_before_closing_bracket() {
        let doc = "INSTALLED_APPS = ['a', 'b']\n";
        let result = register(doc, "c");

        assert_eq!(result.document, "INSTALLED_APPS = ['a', 'b',\n    'c',\n]\n");
    }

    #[test]
    fn wide_indentation_is_preserved() {
        let doc = "INSTALLED_APPS = [\n        'a',\n    ]\n";
        let result = register(doc, "b");

        assert_eq!(result.document, "INSTALLED_APPS = [\n        'a',\n        'b',\n    ]\n");
    }

    #[test]
    fn quote_style_follows_last_item() {
        let doc = "INSTALLED_APPS = [\n    \"a\",\n]\n";
        let result = register(doc, "b");
        assert!(result.document.contains("    \"b\",\n"));
    }

    #[test]
    fn windows_line_endings_are_kept() {
        let doc = "INSTALLED_APPS = [\r\n    'a',\r\n]\r\n";
        let result = register(doc, "b");

        assert_eq!(result.document, "INSTALLED_APPS = [\r\n    'a',\r\n    'b',\r\n]\r\n");
        assert!(!result.document.replace("\r\n", "").contains('\n'));

        let empty = register("INSTALLED_APPS = []\r\n", "b");
        assert_eq!(empty.document, "INSTALLED_APPS = [\r\n    'b',\r\n]\r\n");

        let single = register("INSTALLED_APPS = ['a']\r\n", "b");
        assert_eq!(single.document, "INSTALLED_APPS = ['a',\r\n    'b',\r\n]\r\n");
    }

    #[test]
    fn marker_may_span_lines() {
        let doc = "INSTALLED_APPS = \\\n[\n    'a',\n]\n";
        // the continuation backslash sits between `=` and `[`, so no match
        assert_eq!(register(doc, "b").outcome, RegistrationOutcome::ListNotFound);

        let doc = "INSTALLED_APPS =\n    [\n        'a',\n    ]\n";
        assert_eq!(register(doc, "b").outcome, RegistrationOutcome::Inserted);
    }

    #[test]
    fn items_are_collected_at_top_level_only() {
        let doc = "INSTALLED_APPS = [\n    'a',\n    *['nested'],\n    \"b\",\n]\n";
        let list = RegistryList::locate(doc).unwrap();
        let values: Vec<_> = list.items().iter().map(|i| i.value).collect();
        assert_eq!(values, ["a", "b"]);
    }
}
