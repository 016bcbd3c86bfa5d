//! Extraction of rendered characters from SVG `<text>` elements.

use std::{borrow::Cow, fs::read_to_string, path::Path, sync::LazyLock};

use log::{debug, warn};
use regex::{Captures, Regex};

use crate::CharSet;

/// Inner content of each `<text>` element, up to the next `</text>`.
///
/// The element name must be exactly `text`, so `<textPath>` is not a match,
/// and a self-closing `<text/>` has no content to capture.
static TEXT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b(?:[^>]*[^/>])?>(.*?)</text>").unwrap());

/// CDATA sections are rendered verbatim, markup characters included.
static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

/// Any tag nested inside a text element, e.g. `<tspan x="4">`.
static INNER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap()
});

/// Characters rendered by the SVG at `path`.
///
/// A missing document contributes nothing. An unreadable one is reported
/// and also contributes nothing.
pub fn scan_document(path: &Path) -> CharSet {
    if !path.exists() {
        debug!("Skipping missing document {}", path.display());
        return CharSet::new();
    }

    match read_to_string(path) {
        Ok(content) => scan_text(&content),
        Err(e) => {
            warn!("Failed to read document {}: {e}", path.display());
            CharSet::new()
        }
    }
}

/// Union of [`scan_document`] over several documents.
pub fn scan_documents<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> CharSet {
    let mut chars = CharSet::new();
    for path in paths {
        chars.union_with(&scan_document(path.as_ref()));
    }
    chars
}

/// Distinct characters inside every `<text>` element of `markup`.
///
/// Nested tags such as `<tspan>` are dropped; only their text is kept.
/// Entity and numeric character references count as the character they
/// stand for. CDATA sections are taken literally.
pub fn scan_text(markup: &str) -> CharSet {
    let mut chars = CharSet::new();
    for caps in TEXT_ELEMENT.captures_iter(markup) {
        add_content(&mut chars, &caps[1]);
    }
    chars
}

fn add_content(chars: &mut CharSet, content: &str) {
    let mut rest = 0;
    for caps in CDATA.captures_iter(content) {
        let Some(section) = caps.get(0) else {
            continue;
        };
        add_markup(chars, &content[rest..section.start()]);
        chars.add_str(&caps[1]);
        rest = section.end();
    }
    add_markup(chars, &content[rest..]);
}

fn add_markup(chars: &mut CharSet, markup: &str) {
    let text = INNER_TAG.replace_all(markup, "");
    chars.add_str(&decode_entities(&text));
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures| {
        let entity = &caps[1];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => numeric_reference(entity),
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}

fn numeric_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}
