//! Pure markup rewrite passes.
//!
//! Each pass takes ownership of the previous pass's output and returns a
//! new string. Order matters: later passes must not re-match text produced
//! by earlier ones. Every pass is individually idempotent.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").expect("valid heading pattern"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid inline code pattern"));

static FENCED_WITH_LANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(\w+)\n(.*?)```").expect("valid fenced code pattern")
});

static FENCED_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\n?(.*?)```").expect("valid fenced code pattern"));

static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^> ?(.*)$").expect("valid quote pattern"));

static UNORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)[-*] (.*)$").expect("valid bullet pattern"));

static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\d+\. (.*)$").expect("valid ordered pattern"));

/// Translates GitHub markdown constructs into Jira wiki markup.
///
/// Applies, in order: headings, bold, inline code, fenced code blocks
/// (with then without a language tag), block quotes, unordered lists,
/// ordered lists. Image references must already have been rewritten.
pub fn translate_markup(text: &str) -> String {
    let text = headings(text);
    let text = bold(&text);
    let text = inline_code(&text);
    let text = fenced_code(&text);
    let text = quotes(&text);
    let text = unordered_lists(&text);
    ordered_lists(&text)
}

/// `# Title` .. `###### Title` become `h1. Title` .. `h6. Title`.
///
/// Capturing the full marker run matches the most specific level first.
fn headings(text: &str) -> String {
    HEADING
        .replace_all(text, |captures: &Captures| {
            format!("h{}. {}", captures[1].len(), &captures[2])
        })
        .into_owned()
}

/// `**` becomes `*`. A literal substitution, not balanced-pair parsing.
fn bold(text: &str) -> String {
    text.replace("**", "*")
}

/// `` `code` `` becomes `{{code}}`. Spans never cross a newline.
fn inline_code(text: &str) -> String {
    INLINE_CODE.replace_all(text, "{{$1}}").into_owned()
}

/// Fenced blocks become `{code}` blocks, keeping any language tag.
fn fenced_code(text: &str) -> String {
    let text = FENCED_WITH_LANG.replace_all(text, "{code:$1}\n$2{code}");
    FENCED_PLAIN.replace_all(&text, "{code}\n$1{code}").into_owned()
}

/// `> quoted` lines become `bq. quoted`, one line at a time.
fn quotes(text: &str) -> String {
    QUOTE.replace_all(text, "bq. $1").into_owned()
}

/// `- item` and `* item` lines become `* item`, indentation preserved.
fn unordered_lists(text: &str) -> String {
    UNORDERED.replace_all(text, "$1* $2").into_owned()
}

/// `1. item` lines become `# item`, indentation preserved.
fn ordered_lists(text: &str) -> String {
    ORDERED.replace_all(text, "$1# $2").into_owned()
}
