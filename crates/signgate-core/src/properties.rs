//! Reader for `key=value` properties files
//!
//! Supports the subset of the Java properties format that keystore
//! descriptors use in practice: `#`/`!` comments, `=`, `:` or whitespace
//! separators, backslash line continuations and the standard escapes.

use std::collections::BTreeMap;

use thiserror::Error;

/// Properties parse failure
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line where the offending entry starts
    pub line: usize,
    pub message: String,
}

/// Parsed key-value pairs of a properties file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Create an empty set of properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties from raw file bytes decoded as ISO-8859-1, the
    /// encoding properties files are loaded with. Every byte sequence is
    /// accepted.
    pub fn parse_latin1(bytes: &[u8]) -> Result<Self, ParseError> {
        let content: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&content)
    }

    /// Parse properties from file contents.
    ///
    /// Later occurrences of a key replace earlier ones.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut entries = BTreeMap::new();
        let mut lines = natural_lines(content).enumerate();

        while let Some((index, raw)) = lines.next() {
            let start_line = index + 1;
            let trimmed = raw.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let key = unescape(key).map_err(|message| ParseError {
                line: start_line,
                message,
            })?;
            let value = unescape(value).map_err(|message| ParseError {
                line: start_line,
                message,
            })?;

            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present (even with an empty value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split on `\n`, `\r\n` and bare `\r`
fn natural_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(i) => {
                let line = &rest[..i];
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + terminator..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map(|r| r.trim_start_matches([' ', '\t', '\u{c}']))
        .unwrap_or(rest);

    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = utf16_unit(&mut chars)?;
                let mut units = vec![unit];
                // A high surrogate must be followed by an escaped low surrogate
                if (0xD800..=0xDBFF).contains(&unit) {
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        units.push(utf16_unit(&mut lookahead)?);
                        chars = lookahead;
                    }
                }
                for decoded in char::decode_utf16(units) {
                    let decoded = decoded
                        .map_err(|e| format!("unpaired surrogate \\u{:04X}", e.unpaired_surrogate()))?;
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Read the four hex digits of a `\uXXXX` escape
fn utf16_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    (hex.len() == 4)
        .then(|| u16::from_str_radix(&hex, 16).ok())
        .flatten()
        .ok_or_else(|| format!("malformed \\uxxxx escape: \\u{}", hex))
}

/// Escape a value for writing, as `Properties.store` does: a leading space,
/// backslashes, control characters, the separators and comment markers are
/// escaped, and anything outside printable ASCII becomes `\uXXXX`.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for (i, c) in value.chars().enumerate() {
        match c {
            ' ' if i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }

    out
}
