use regex::RegexBuilder;

use super::{Matcher, PatternError, PatternResult};

/// ASCII word characters only, case folding included.
const WORD_CAPTURE: &str = r"(?-u:\w)+";

/// Compiles a segment pattern into a case-insensitive [`Matcher`].
///
/// `:name` captures one or more word characters under `name`; a colon written
/// right after the name ends it without being matched (`:name:ory`). `*` is an
/// unnamed word capture. Anything else is raw pattern text.
#[inline]
pub fn compile(pattern: &str) -> PatternResult<Matcher> {
    compile_with(pattern, false)
}

#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, case_sensitive = case_sensitive))]
pub fn compile_with(pattern: &str, case_sensitive: bool) -> PatternResult<Matcher> {
    let expanded = expand(pattern);
    let source = format!("^(?:{expanded})$");

    let regex = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|source| PatternError::InvalidPattern {
            pattern: pattern.to_string(),
            expanded: expanded.clone(),
            source,
        })?;

    Ok(Matcher::new(pattern, regex, case_sensitive))
}

/// Rewrites the shorthand capture syntax into regex syntax.
pub(crate) fn expand(pattern: &str) -> String {
    let bytes = pattern.as_bytes();
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                // escapes pass through untouched so `\*` stays literal
                let width = pattern[i + 1..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&pattern[i..i + 1 + width]);
                i += 1 + width;
            }
            b':' if !follows_group_marker(bytes, i) => {
                let name_len = word_len(&bytes[i + 1..]);
                if name_len == 0 {
                    out.push(':');
                    i += 1;
                    continue;
                }

                let name = &pattern[i + 1..i + 1 + name_len];
                out.push_str("(?<");
                out.push_str(name);
                out.push('>');
                out.push_str(WORD_CAPTURE);
                out.push(')');

                i += 1 + name_len;
                if bytes.get(i) == Some(&b':') {
                    i += 1;
                }
            }
            b'*' => {
                out.push('(');
                out.push_str(WORD_CAPTURE);
                out.push(')');
                i += 1;
            }
            _ => {
                let width = pattern[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&pattern[i..i + width]);
                i += width;
            }
        }
    }

    out
}

fn word_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

// `(?:`, `(?i:` and friends are regex group syntax, not captures
fn follows_group_marker(bytes: &[u8], colon: usize) -> bool {
    bytes[..colon]
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_alphabetic() || **b == b'-')
        .count()
        .checked_add(1)
        .and_then(|n| colon.checked_sub(n))
        .is_some_and(|q| bytes[q] == b'?' && q > 0 && bytes[q - 1] == b'(')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_named_capture() {
        assert_eq!(expand(":name"), r"(?<name>(?-u:\w)+)");
    }

    #[test]
    fn consumes_colon_terminating_a_name() {
        assert_eq!(expand(":name:ory"), r"(?<name>(?-u:\w)+)ory");
        assert_eq!(
            expand(":name:ory-:relationship"),
            r"(?<name>(?-u:\w)+)ory-(?<relationship>(?-u:\w)+)"
        );
    }

    #[test]
    fn expands_wildcards_positionally() {
        assert_eq!(expand("*-isa-*"), r"((?-u:\w)+)-isa-((?-u:\w)+)");
    }

    #[test]
    fn keeps_escaped_asterisk_and_group_syntax() {
        assert_eq!(expand(r"a\*b"), r"a\*b");
        assert_eq!(expand("(?:ab)+"), "(?:ab)+");
        assert_eq!(expand("(?i:ab)"), "(?i:ab)");
    }

    #[test]
    fn leaves_raw_named_groups_alone() {
        assert_eq!(expand("album-(?<number>[0-9]+)"), "album-(?<number>[0-9]+)");
    }

    #[test]
    fn bare_colon_is_literal() {
        assert_eq!(expand("a:-b"), "a:-b");
    }
}
