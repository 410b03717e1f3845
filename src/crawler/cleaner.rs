//! Text cleaning pipeline
//!
//! Extracted page text passes through a deterministic three-stage pipeline:
//! whitespace collapse, boilerplate phrase removal, and short-fragment
//! filtering. The pipeline is idempotent: cleaning already-clean text is a
//! no-op, which keeps re-processing of a dataset safe.
//!
//! Boilerplate removal is a declarative rule table rather than ad hoc
//! string matching, so the phrase list can grow without touching the
//! control flow.

/// Fragments with fewer words than this never stand alone in cleaned text
pub const MIN_FRAGMENT_WORDS: usize = 5;

/// Ordered list of exact phrases removed from extracted text, matched
/// case-insensitively. Site chrome and repeated footer material that the
/// element-level exclusions cannot catch.
const BOILERPLATE_PHRASES: &[&str] = &[
    "Skip to main content",
    "Skip to navigation",
    "Back to Top",
    "Report abuse",
    "Page updated",
    "Google Sites",
    "Metropole Ballard",
    "Metropole HOA",
    "Copyright",
];

/// Cleans extracted page text
///
/// Pipeline, applied in order:
///
/// 1. Collapse runs of spaces/tabs to single spaces and runs of blank
///    lines to a single separator
/// 2. Strip every boilerplate phrase (case-insensitive)
/// 3. Segment into line-level fragments, drop fragments shorter than
///    [`MIN_FRAGMENT_WORDS`] words, and join the survivors with `\n`
///
/// For all inputs `clean(clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    let mut current = collapse_whitespace(text);

    // Phrase removal leaves doubled spaces behind, and collapsing those can
    // expose a phrase that was split across a removal site, so the two
    // stages run together until the text is stable.
    loop {
        let next = collapse_whitespace(&strip_boilerplate(&current));
        if next == current {
            break;
        }
        current = next;
    }

    drop_short_fragments(&current)
}

/// Collapses horizontal whitespace runs and blank-line runs
fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in text.lines() {
        let squeezed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if squeezed.is_empty() {
            if !previous_blank && !lines.is_empty() {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(squeezed);
            previous_blank = false;
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Removes every rule-table phrase from the text
fn strip_boilerplate(text: &str) -> String {
    let mut current = text.to_string();
    for phrase in BOILERPLATE_PHRASES {
        current = strip_phrase(&current, phrase);
    }
    current
}

/// Removes all occurrences of a phrase, case-insensitively, repeating
/// until none remain so that removals cannot splice a new occurrence
/// together out of the surrounding text.
fn strip_phrase(text: &str, phrase: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_phrase_once(&current, phrase);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

/// Single left-to-right pass removing each match of the phrase
///
/// Matching is done on an ASCII-lowercased copy, which is byte-length
/// preserving, so match offsets index directly into the original text.
fn strip_phrase_once(text: &str, phrase: &str) -> String {
    let haystack = text.to_ascii_lowercase();
    let needle = phrase.to_ascii_lowercase();

    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(found) = haystack[pos..].find(&needle) {
        let start = pos + found;
        result.push_str(&text[pos..start]);
        pos = start + needle.len();
    }
    result.push_str(&text[pos..]);
    result
}

/// Drops line-level fragments with fewer than [`MIN_FRAGMENT_WORDS`] words
fn drop_short_fragments(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.split_whitespace().count() >= MIN_FRAGMENT_WORDS)
        .collect::<Vec<_>>()
        .join("\n")
}
