//! Log sanitization for child-identifying details.
//!
//! Call sites never log the child's name; this writer is the fallback that
//! scrubs formatted log lines before they reach the sink. It redacts:
//! - `name=...` / `child_name: ...` style fields
//! - E-mail addresses and phone numbers
//! - UUIDs
//!
//! Input is capped (see `CHILDRISK_SANITIZE_MAX_BYTES`) so a runaway log line
//! cannot make sanitization arbitrarily expensive.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Defaults to 16 KiB; can be overridden via `CHILDRISK_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const RULES: [(&str, &str); 4] = [
    // Named fields carrying a child's name, quoted or bare
    (
        r#"(?i)\b(?:child[_ ]?name|name)\b\s*[:=]\s*(?:"[^"\n]*"|'[^'\n]*'|[^\s,;)\]}]+)"#,
        "name=[REDACTED-NAME]",
    ),
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    // International or local phone numbers (e.g. +255 712 345 678, 0712-345-678)
    (
        r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3,4}\)?[-.\s]\d{3}[-.\s]\d{3,4}\b",
        "[REDACTED-PHONE]",
    ),
];

struct Pattern {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Pattern>,
}

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let set = RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = RULES
            .iter()
            .map(|(pattern, replacement)| Pattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();
        Patterns { set, rules }
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CHILDRISK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace identifying patterns in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// line by line before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A huge line with no newline is flushed as-is (capped by `sanitize`).
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sanitize_name_fields() {
        let sanitized = sanitize(r#"submitted child_name="Amara Wanjiru" age=2"#);
        assert!(sanitized.contains("[REDACTED-NAME]"));
        assert!(!sanitized.contains("Amara"));
        assert!(sanitized.contains("age=2"));

        let sanitized = sanitize("name: Baraka, risk=High");
        assert!(!sanitized.contains("Baraka"));
        assert!(sanitized.contains("risk=High"));
    }

    #[test]
    fn test_sanitize_uuid() {
        let sanitized = sanitize("session 550e8400-e29b-41d4-a716-446655440000 done");
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(!sanitized.contains("550e8400"));
    }

    #[test]
    fn test_sanitize_email_and_phone() {
        let sanitized = sanitize("contact mama@example.co.tz or +255 712 345 678");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("712"));
    }

    #[test]
    fn test_clean_lines_pass_through() {
        let line = "Assessment complete: risk=High, low=5.0%, medium=15.0%, high=80.0%";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("risk=Low and a very long tail", 8);
        assert!(sanitized.starts_with("risk=Low"));
        assert!(sanitized.ends_with("[TRUNCATED]"));

        // Never split a multi-byte character.
        let sanitized = sanitize_with_limit("🚨🚨", 5);
        assert!(sanitized.starts_with('🚨'));
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("sink lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sanitizes_split_lines() {
        let sink = Sink::default();
        {
            let mut writer = SanitizingWriter::new(sink.clone());
            writer.write_all(b"child_na").expect("write");
            writer.write_all(b"me=Amara risk=High\nsecond line").expect("write");
        }

        let out = String::from_utf8(sink.0.lock().expect("sink lock").clone()).expect("utf8");
        assert_eq!(out, "name=[REDACTED-NAME] risk=High\nsecond line");
    }
}
