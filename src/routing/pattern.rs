//! Ant-style segment patterns.
//!
//! Used for paths (`/` separator) and host names (`.` separator):
//! - `**` matches zero or more whole segments
//! - `*` matches any run of characters inside one segment
//! - `?` matches exactly one character
//! - `{name}` matches exactly one non-empty segment
//!
//! Empty segments (leading, trailing or doubled separators) are ignored on
//! both sides, so `/a/` and `/a` are equivalent.
//!
//! Patterns compile to an anchored [`Regex`], so matching is linear in the
//! input length whatever the wildcards.

use std::fmt;

use regex::Regex;

/// A compiled Ant-style pattern.
#[derive(Clone)]
pub struct AntPattern {
    source: String,
    separator: char,
    regex: Regex,
}

impl AntPattern {
    pub fn new(pattern: &str, separator: char) -> Result<Self, regex::Error> {
        let regex = Regex::new(&translate(pattern, separator))?;
        Ok(Self {
            source: pattern.to_string(),
            separator,
            regex,
        })
    }

    /// Pattern over `/`-separated paths.
    pub fn path(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(pattern, '/')
    }

    /// Pattern over `.`-separated host names.
    pub fn host(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(pattern, '.')
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

impl fmt::Debug for AntPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AntPattern")
            .field("pattern", &self.source)
            .field("separator", &self.separator)
            .finish()
    }
}

/// Build the anchored regex source for `pattern`.
///
/// Every segment is followed by a run of separators or the end of input, and
/// leading separators are skipped, so empty segments never take part.
fn translate(pattern: &str, separator: char) -> String {
    let sep = regex::escape(&separator.to_string());
    let segment_char = format!("[^{}]", sep);
    let boundary = format!("(?:{}+|$)", sep);

    let mut out = format!("^{}*", sep);
    let mut previous_any_depth = false;

    for raw in pattern.split(separator).filter(|s| !s.is_empty()) {
        if raw == "**" {
            if !previous_any_depth {
                out.push_str(&format!("(?:{}+{})*", segment_char, boundary));
            }
            previous_any_depth = true;
            continue;
        }
        previous_any_depth = false;

        if raw.starts_with('{') && raw.ends_with('}') && raw.len() > 2 {
            out.push_str(&format!("{}+", segment_char));
        } else if raw.chars().all(|c| c == '*') {
            // a lone `*` still needs a segment to match
            out.push_str(&format!("{}+", segment_char));
        } else {
            let mut chars = raw.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '*' => {
                        while chars.peek() == Some(&'*') {
                            chars.next();
                        }
                        out.push_str(&format!("{}*", segment_char));
                    }
                    '?' => out.push_str(&segment_char),
                    c => out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
                }
            }
        }
        out.push_str(&boundary);
    }

    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn path(pattern: &str) -> AntPattern {
        AntPattern::path(pattern).unwrap()
    }

    fn host(pattern: &str) -> AntPattern {
        AntPattern::host(pattern).unwrap()
    }

    #[test]
    fn test_double_star() {
        let p = path("/a/**");
        assert!(p.matches("/a"));
        assert!(p.matches("/a/x"));
        assert!(p.matches("/a/x/y/z"));
        assert!(!p.matches("/b"));
        assert!(!p.matches("/ab"));

        let all = path("/**");
        assert!(all.matches("/"));
        assert!(all.matches("/b"));

        let middle = path("/a/**/z");
        assert!(middle.matches("/a/z"));
        assert!(middle.matches("/a/b/c/z"));
        assert!(!middle.matches("/a/b/c"));
    }

    #[test]
    fn test_single_segment_wildcards() {
        let p = path("/files/*.txt");
        assert!(p.matches("/files/readme.txt"));
        assert!(!p.matches("/files/dir/readme.txt"));
        assert!(!p.matches("/files/readme.md"));

        let q = path("/v?/items");
        assert!(q.matches("/v1/items"));
        assert!(!q.matches("/v10/items"));

        let lone = path("/files/*");
        assert!(lone.matches("/files/a"));
        assert!(!lone.matches("/files/"));
        assert!(!lone.matches("/files/a/b"));
    }

    #[test]
    fn test_variables_and_literals() {
        let p = path("/users/{id}/orders");
        assert!(p.matches("/users/42/orders"));
        assert!(p.matches("/users/42/orders/"));
        assert!(!p.matches("/users/orders"));
        assert!(!p.matches("/users/42/orders/7"));

        assert!(path("/exact").matches("/exact"));
        assert!(!path("/exact").matches("/Exact"));
        assert!(path("/a//b").matches("//a/b//"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = path("/v1.0/(x)+");
        assert!(p.matches("/v1.0/(x)+"));
        assert!(!p.matches("/v1x0/xx"));
    }

    #[test]
    fn test_empty_pattern() {
        let p = path("/");
        assert!(p.matches("/"));
        assert!(p.matches(""));
        assert!(!p.matches("/a"));
    }

    #[test]
    fn test_host_patterns() {
        let p = host("**.example.org");
        assert!(p.matches("example.org"));
        assert!(p.matches("api.example.org"));
        assert!(p.matches("a.b.example.org"));
        assert!(!p.matches("example.com"));
        assert!(!p.matches("exampleXorg"));

        let star = host("*.example.org");
        assert!(star.matches("www.example.org"));
        assert!(!star.matches("a.b.example.org"));
    }

    #[test]
    fn test_many_wildcards_on_long_input_stay_fast() {
        let segments = "/a".repeat(2_000);
        let letters = format!("/{}", "a".repeat(10_000));
        let started = Instant::now();

        assert!(!path("/**/a/**/a/**/a/**/b").matches(&segments));
        assert!(path("/**/a/**/a/**/a/**").matches(&segments));
        assert!(!path("/*a*a*a*a*b").matches(&letters));
        assert!(path("/*a*a*a*a*").matches(&letters));

        assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
    }
}
