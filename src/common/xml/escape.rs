use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so that "&amp;lt;" decodes to "&lt;" rather than "<"
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters for use in text content and attribute values.
///
/// Control characters are written in the `_xHHHH_` form first, see
/// [`escape_control_chars`].
///
/// # Examples
///
/// ```
/// use slidesmith::common::xml::escape_xml;
/// assert_eq!(escape_xml("Q&A"), "Q&amp;A");
/// assert_eq!(escape_xml("<p:sp>"), "&lt;p:sp&gt;");
/// assert_eq!(escape_xml("bell\u{7}"), "bell_x0007_");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(
        &escape_control_chars(s),
        &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"],
    )
}

/// Control characters XML 1.0 cannot carry literally (C0 except tab and LF).
#[inline]
fn is_escaped_control(c: char) -> bool {
    c < '\u{20}' && c != '\t' && c != '\n'
}

/// Length of an `_xHHHH_` sequence at the start of `s`, if there is one.
#[inline]
fn xhhhh_at(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || &bytes[..2] != b"_x" || bytes[6] != b'_' {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Encode control characters in the OOXML `_xHHHH_` form.
///
/// An underscore that would otherwise start a literal `_xHHHH_` sequence is
/// itself written as `_x005F_`, so [`unescape_control_chars`] restores the
/// original text exactly.
///
/// # Examples
///
/// ```
/// use slidesmith::common::xml::escape_control_chars;
/// assert_eq!(escape_control_chars("a\u{1}b"), "a_x0001_b");
/// assert_eq!(escape_control_chars("_x0041_"), "_x005F_x0041_");
/// assert_eq!(escape_control_chars("tab\tok"), "tab\tok");
/// ```
pub fn escape_control_chars(s: &str) -> Cow<'_, str> {
    let needs_escape = s
        .char_indices()
        .any(|(i, c)| is_escaped_control(c) || (c == '_' && xhhhh_at(&s[i..]).is_some()));
    if !needs_escape {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        if is_escaped_control(c) {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && xhhhh_at(&s[i..]).is_some() {
            out.push_str("_x005F_");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Decode `_xHHHH_` sequences written by [`escape_control_chars`].
///
/// # Examples
///
/// ```
/// use slidesmith::common::xml::unescape_control_chars;
/// assert_eq!(unescape_control_chars("a_x0001_b"), "a\u{1}b");
/// assert_eq!(unescape_control_chars("_x005F_x0041_"), "_x0041_");
/// assert_eq!(unescape_control_chars("snake_case"), "snake_case");
/// ```
pub fn unescape_control_chars(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match xhhhh_at(tail).and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            },
            None => {
                out.push('_');
                rest = &tail[1..];
            },
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use slidesmith::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("Q&amp;A"), "Q&A");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> String {
    XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"])
}

/// Resolve the name of an entity reference (the part between `&` and `;`).
///
/// Handles the five predefined entities plus decimal and hex character
/// references. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use slidesmith::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
/// assert_eq!(resolve_entity("#x41").as_deref(), Some("A"));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => return None,
    };
    Some(resolved.to_string())
}
