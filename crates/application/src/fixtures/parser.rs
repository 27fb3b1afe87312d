//! Placeholder parser for `{{fixture}}` syntax
//!
//! Extracts fixture references with their byte positions so they can be
//! substituted in place.

use std::ops::Range;

/// A `{{name}}` reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The fixture key (without braces, trimmed).
    pub name: String,
    /// Byte range of the whole `{{...}}` token in the template.
    pub span: Range<usize>,
}

/// Parses a template and returns every placeholder in order of appearance.
///
/// Unclosed `{{` and empty `{{ }}` tokens are ignored.
///
/// # Examples
///
/// ```
/// use probe_application::fixtures::parse_placeholders;
///
/// let refs = parse_placeholders("/users/{{created_user_id}}");
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].name, "created_user_id");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch != '{' || !matches!(chars.peek(), Some((_, '{'))) {
            continue;
        }
        chars.next();

        let mut name = String::new();
        let mut closed = false;
        while let Some((_, ch)) = chars.next() {
            if ch == '}' {
                if let Some(&(end_idx, '}')) = chars.peek() {
                    chars.next();
                    let trimmed = name.trim();
                    if !trimmed.is_empty() {
                        placeholders.push(Placeholder {
                            name: trimmed.to_string(),
                            span: start..end_idx + 1,
                        });
                    }
                    closed = true;
                    break;
                }
            }
            name.push(ch);
        }

        if !closed {
            break;
        }
    }

    placeholders
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single() {
        let refs = parse_placeholders("{{id}}");
        assert_eq!(
            refs,
            vec![Placeholder {
                name: "id".into(),
                span: 0..6
            }]
        );
    }

    #[test]
    fn test_parse_multiple_with_whitespace() {
        let refs = parse_placeholders("/orgs/{{ org }}/users/{{user}}?page=2");
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["org", "user"]);
    }

    #[test]
    fn test_span_positions() {
        let input = "/users/{{id}}/posts";
        let refs = parse_placeholders(input);
        assert_eq!(&input[refs[0].span.clone()], "{{id}}");
    }

    #[test]
    fn test_ignores_malformed_tokens() {
        assert!(parse_placeholders("/users/{id}").is_empty());
        assert!(parse_placeholders("/users/{{}}").is_empty());
        assert!(parse_placeholders("/users/{{id").is_empty());
        assert!(parse_placeholders("/users?page=2").is_empty());
    }
}
