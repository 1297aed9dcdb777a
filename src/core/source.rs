//! `.properties` files as a `config` source.
//!
//! Keys are stored in canonical form so that `app.app-name`, `app.appName`
//! and `app.app_name` all resolve to the same entry. Values are kept verbatim.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::Chars;

use config::{ConfigError, Map, Source, Value, ValueKind};
use tracing::debug;

use crate::errors::BindError;

/// Returns the relaxed, case- and separator-insensitive form of a key.
#[must_use]
pub fn canonical_key(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            segment
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// One parsed `.properties` origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    entries: BTreeMap<String, String>,
}

impl PropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(canonical_key(key), value.into());
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&canonical_key(key)).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Reads and parses a `.properties` file.
    ///
    /// # Errors
    ///
    /// Returns `BindError::Io` if the file cannot be read and
    /// `BindError::Parse` if its contents are malformed.
    pub fn load_file(path: &Path) -> Result<Self, BindError> {
        let path_name = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| BindError::io(&path_name, &e))?;
        let source = Self::parse_properties(&path_name, &text)?;
        debug!(source = %path_name, entries = source.len(), "Loaded properties file");
        Ok(source)
    }

    /// Parses `.properties` text.
    ///
    /// Supports `#`/`!` comments, `=`/`:`/whitespace separators, backslash
    /// line continuations and the usual escapes including `\uXXXX` and
    /// surrogate pairs.
    ///
    /// # Errors
    ///
    /// Returns `BindError::Parse` on a malformed escape sequence.
    pub fn parse_properties(name: &str, text: &str) -> Result<Self, BindError> {
        let mut source = Self::new(name);
        let mut lines = text.lines().enumerate();

        while let Some((idx, raw)) = lines.next() {
            let first_line = idx + 1;
            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = String::from(trimmed);
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, name, first_line)?;
            let value = unescape(raw_value, name, first_line)?;
            source.insert(&key, value);
        }

        Ok(source)
    }
}

impl Source for PropertySource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self
            .entries
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    Value::new(Some(&self.name), ValueKind::String(value.clone())),
                )
            })
            .collect())
    }
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (line[..i].trim_end(), line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .map_or(rest, str::trim_start);
                return (&line[..i], rest);
            }
            _ => {}
        }
    }
    (line, "")
}

/// Reads exactly four ASCII hex digits.
fn read_hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// Decodes a `\uXXXX` escape whose `\u` has been consumed, joining a high
/// surrogate with the `\uXXXX` low surrogate that must follow it.
fn decode_unicode_escape(chars: &mut Chars<'_>) -> Result<char, String> {
    let unit = read_hex4(chars).ok_or("malformed \\uxxxx encoding")?;

    if (0xD800..=0xDBFF).contains(&unit) {
        let mut lookahead = chars.clone();
        let low = match (lookahead.next(), lookahead.next()) {
            (Some('\\'), Some('u')) => read_hex4(&mut lookahead),
            _ => None,
        };
        return match low {
            Some(low @ 0xDC00..=0xDFFF) => {
                *chars = lookahead;
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or_else(|| format!("invalid surrogate pair \\u{unit:04X}"))
            }
            _ => Err(format!("unpaired high surrogate \\u{unit:04X}")),
        };
    }

    char::from_u32(unit).ok_or_else(|| format!("unpaired low surrogate \\u{unit:04X}"))
}

fn unescape(raw: &str, source_name: &str, line: usize) -> Result<String, BindError> {
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
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let decoded =
                    decode_unicode_escape(&mut chars).map_err(|message| BindError::Parse {
                        source_name: source_name.to_string(),
                        line,
                        message,
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
