//! Recovery parser: turn a raw model completion into a JSON value.
//!
//! Completions are supposed to be a bare JSON object but often arrive wrapped in a
//! markdown fence, surrounded by prose, or with raw control characters inside string
//! literals. Strategies run in a fixed order, cheapest first, and the first strict
//! parse that succeeds wins. A strategy that returns `None` does not apply to the input.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::core::util::{PREVIEW_CHARS, bounded_preview};

use super::error::ParseFailure;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```json\s*").expect("fence regex is valid"));
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("fence regex is valid"));

/// Recovery strategy that produced a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    FencedBlock,
    Boundary,
    AggressiveClean,
    EscapeControl,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::FencedBlock => "fenced-block",
            Strategy::Boundary => "boundary",
            Strategy::AggressiveClean => "aggressive-clean",
            Strategy::EscapeControl => "escape-control",
        }
    }
}

/// Builds the text a strategy hands to the strict parser.
type Candidate = for<'a> fn(&'a str) -> Option<Cow<'a, str>>;

const CHAIN: [(Strategy, Candidate); 5] = [
    (Strategy::Direct, direct),
    (Strategy::FencedBlock, strip_fence),
    (Strategy::Boundary, extract_boundary),
    (Strategy::AggressiveClean, clean_boundaries),
    (Strategy::EscapeControl, escape_in_strings),
];

/// A parsed value and the strategy that recovered it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub value: Value,
    pub strategy: Strategy,
}

/// Parse a raw completion into a JSON value, trying each strategy in order.
pub fn parse(raw: &str) -> Result<Value, ParseFailure> {
    recover(raw).map(|r| r.value)
}

/// Like [`parse`], but also reports which strategy succeeded.
pub fn recover(raw: &str) -> Result<Recovered, ParseFailure> {
    for (strategy, build) in CHAIN {
        let Some(candidate) = build(raw) else {
            log::debug!("Strategy {} not applicable", strategy.name());
            continue;
        };
        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => {
                if strategy != Strategy::Direct {
                    log::info!("Recovered model JSON with strategy {}", strategy.name());
                }
                return Ok(Recovered { value, strategy });
            }
            Err(e) => log::debug!("Strategy {} failed: {}", strategy.name(), e),
        }
    }
    Err(ParseFailure {
        preview: bounded_preview(raw, PREVIEW_CHARS).to_string(),
    })
}

fn direct(raw: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(raw.trim()))
}

/// Strip a leading ```` ```json ```` fence and a trailing ```` ``` ````.
fn strip_fence(raw: &str) -> Option<Cow<'_, str>> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```json") {
        return None;
    }
    let body = FENCE_OPEN.replace(trimmed, "");
    let body = FENCE_CLOSE.replace(&body, "").into_owned();
    Some(Cow::Owned(body))
}

/// Slice from the first `{` to the last `}` (inclusive), if the last follows the first.
fn object_bounds(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (end > start).then(|| &s[start..=end])
}

fn extract_boundary(raw: &str) -> Option<Cow<'_, str>> {
    object_bounds(raw).map(Cow::Borrowed)
}

/// Cut leading content before the first `{`, then trailing content after the last `}`.
/// The two cuts are independent: either may apply without the other.
fn clean_boundaries(raw: &str) -> Option<Cow<'_, str>> {
    let mut fixed = raw.trim();
    if let Some(first) = fixed.find('{')
        && first > 0
    {
        fixed = &fixed[first..];
    }
    if let Some(last) = fixed.rfind('}')
        && last + 1 < fixed.len()
    {
        fixed = &fixed[..=last];
    }
    Some(Cow::Borrowed(fixed))
}

fn escape_in_strings(raw: &str) -> Option<Cow<'_, str>> {
    let trimmed = raw.trim();
    let bounded = object_bounds(trimmed).unwrap_or(trimmed);
    Some(Cow::Owned(escape_control_chars(bounded)))
}

/// Escape raw control characters that appear inside JSON string literals.
///
/// Tracks two flags while scanning code points: whether the cursor is inside a string
/// (toggled by each unescaped `"`) and whether the previous character was a backslash
/// that has not been consumed yet. The character after a backslash is copied as-is, so
/// sequences that are already escaped are never escaped twice. Text outside strings is
/// copied unchanged.
pub(crate) fn escape_control_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for c in s.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            _ if in_string => match control_escape(c) {
                Some(esc) => out.push_str(esc),
                None => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

/// JSON escape for the control characters models leave raw in string values.
/// Vertical tab has no short escape in JSON, so it gets the `\u` form.
fn control_escape(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        '\u{0C}' => Some("\\f"),
        '\u{08}' => Some("\\b"),
        '\u{0B}' => Some("\\u000b"),
        _ => None,
    }
}
