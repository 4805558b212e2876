//! Properties text format.
//!
//! `key=value` lines with `#`/`!` comments, backslash escapes and line
//! continuations. Output is plain ASCII: anything outside printable ASCII
//! is written as `\uXXXX` UTF-16 units, so the file reads the same under
//! any platform encoding.

use chrono::{DateTime, Utc};
use std::io::{self, Read, Write};

use crate::error::PropertiesError;
use crate::set::DescriptorSet;

/// Format of the timestamp comment written under the header.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

/// Render `set` as properties text.
///
/// The optional `comment` goes first (one `#` line per comment line),
/// followed by a `#` timestamp line and the entries in insertion order.
pub fn to_properties_string(
    set: &DescriptorSet,
    comment: Option<&str>,
    timestamp: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    if let Some(comment) = comment {
        write_comment(&mut out, comment);
    }
    out.push('#');
    out.push_str(&timestamp.format(TIMESTAMP_FORMAT).to_string());
    out.push('\n');

    for (key, value) in set.iter() {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Write `set` as properties text to `writer`.
pub fn write_properties<W: Write>(
    set: &DescriptorSet,
    comment: Option<&str>,
    timestamp: DateTime<Utc>,
    mut writer: W,
) -> io::Result<()> {
    writer.write_all(to_properties_string(set, comment, timestamp).as_bytes())?;
    writer.flush()
}

/// Read properties text from `reader`.
pub fn read_properties<R: Read>(mut reader: R) -> Result<DescriptorSet, PropertiesError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_properties(&text)
}

/// Parse properties text. Later duplicates of a key replace earlier ones.
pub fn parse_properties(text: &str) -> Result<DescriptorSet, PropertiesError> {
    let mut set = DescriptorSet::new();
    let lines = natural_lines(text);
    let mut index = 0;

    while index < lines.len() {
        let line_number = index + 1;
        let first = trim_leading(lines[index]);
        index += 1;

        if first.is_empty() || first.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = String::from(first);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.get(index) {
                Some(next) => {
                    logical.push_str(trim_leading(next));
                    index += 1;
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        set.insert(key, value);
    }

    Ok(set)
}

fn write_comment(out: &mut String, comment: &str) {
    let normalized = comment.replace("\r\n", "\n").replace('\r', "\n");
    for (i, line) in normalized.split('\n').enumerate() {
        if i == 0 || !line.starts_with(['#', '!']) {
            out.push('#');
        }
        for ch in line.chars() {
            if (' '..='~').contains(&ch) || ch == '\t' {
                out.push(ch);
            } else {
                push_unicode_escape(out, ch);
            }
        }
        out.push('\n');
    }
}

fn escape_into(out: &mut String, text: &str, escape_space: bool) {
    for (i, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ' ' if i == 0 || escape_space => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => push_unicode_escape(out, ch),
        }
    }
}

fn push_unicode_escape(out: &mut String, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{0C}')
}

fn trim_leading(line: &str) -> &str {
    line.trim_start_matches(is_blank)
}

/// Split on `\n`, `\r` and `\r\n`.
fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, ch) in line.char_indices() {
        if !preceding_backslash && (ch == '=' || ch == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !preceding_backslash && is_blank(ch) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        preceding_backslash = ch == '\\' && !preceding_backslash;
    }

    let rest = &line[value_start..];
    let mut skip = 0;
    for (i, ch) in rest.char_indices() {
        if is_blank(ch) {
            skip = i + ch.len_utf8();
            continue;
        }
        if !has_separator && (ch == '=' || ch == ':') {
            has_separator = true;
            skip = i + 1;
            continue;
        }
        break;
    }

    (&line[..key_end], &rest[skip..])
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut buf = [0u16; 2];

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            units.extend_from_slice(ch.encode_utf16(&mut buf));
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        let decoded = match escaped {
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(PropertiesError::MalformedEscape { line });
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|_| PropertiesError::MalformedEscape { line })?;
                units.push(unit);
                continue;
            }
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{0C}',
            other => other,
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_header_and_entries() {
        let set: DescriptorSet = [("artifact.id", "g:a:jar:1.0"), ("artifact.file", "lib/a.jar")]
            .into_iter()
            .collect();
        let text = to_properties_string(&set, Some("Generated by promote-artifacts"), fixed_time());

        assert_eq!(
            text,
            "#Generated by promote-artifacts\n\
             #Sat Mar 09 14:05:07 UTC 2024\n\
             artifact.id=g\\:a\\:jar\\:1.0\n\
             artifact.file=lib/a.jar\n"
        );
    }

    #[test]
    fn test_multiline_comment() {
        let text = to_properties_string(&DescriptorSet::new(), Some("one\ntwo\r\n#three"), fixed_time());
        assert!(text.starts_with("#one\n#two\n#three\n#Sat"));
    }

    #[test]
    fn test_escaping_spaces() {
        let set: DescriptorSet = [("a key", " leading and inner ")].into_iter().collect();
        let text = to_properties_string(&set, None, fixed_time());
        assert!(text.ends_with("a\\ key=\\ leading and inner \n"));
    }

    #[test]
    fn test_non_ascii_escaped() {
        let set: DescriptorSet = [("k", "caf\u{e9} \u{1F600}")].into_iter().collect();
        let text = to_properties_string(&set, None, fixed_time());
        assert!(text.ends_with("k=caf\\u00E9 \\uD83D\\uDE00\n"));
        assert!(text.is_ascii());

        let parsed = parse_properties(&text).unwrap();
        assert_eq!(parsed.get("k"), Some("caf\u{e9} \u{1F600}"));
    }

    #[test]
    fn test_parse_separators_and_comments() {
        let text = "# comment\n\
                    ! also comment\n\
                    \n\
                    a=1\n\
                    b: 2\n\
                    c 3\n\
                    d = = 4\n\
                    e\n\
                    \t  f=6\n";
        let set = parse_properties(text).unwrap();

        assert_eq!(set.get("a"), Some("1"));
        assert_eq!(set.get("b"), Some("2"));
        assert_eq!(set.get("c"), Some("3"));
        assert_eq!(set.get("d"), Some("= 4"));
        assert_eq!(set.get("e"), Some(""));
        assert_eq!(set.get("f"), Some("6"));
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let text = "list=one, \\\n    two, \\\r\n    three\nnext=x\n";
        let set = parse_properties(text).unwrap();
        assert_eq!(set.get("list"), Some("one, two, three"));
        assert_eq!(set.get("next"), Some("x"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let set = parse_properties("path=C:\\\\\nother=y\n").unwrap();
        assert_eq!(set.get("path"), Some("C:\\"));
        assert_eq!(set.get("other"), Some("y"));
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let set = parse_properties("a\\=b\\:c=d\n").unwrap();
        assert_eq!(set.get("a=b:c"), Some("d"));
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse_properties("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert!(matches!(err, PropertiesError::MalformedEscape { line: 2 }));

        let err = parse_properties("short=\\u12").unwrap_err();
        assert!(matches!(err, PropertiesError::MalformedEscape { line: 1 }));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let set = parse_properties("k=1\nk=2\n").unwrap();
        assert_eq!(set.get("k"), Some("2"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_write_then_read_preserves_special_values() {
        let set: DescriptorSet = [
            ("artifact.file", "dir with space/a=b#c!.jar"),
            ("artifact.scope", "\ttabbed\nline"),
        ]
        .into_iter()
        .collect();

        let mut bytes = Vec::new();
        write_properties(&set, Some("header"), fixed_time(), &mut bytes).unwrap();
        let parsed = read_properties(bytes.as_slice()).unwrap();

        assert_eq!(parsed, set);
    }
}
