//! Comment hint directives.
//!
//! A leading comment of the form `// tscpp: persistent` asks the compiler
//! to store a variable through a persistent GC root instead of a plain
//! pointer. Unknown directives are ignored rather than rejected, so hints
//! stay forward compatible.

/// A recognized hint directive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hint {
    Persistent,
}

/// Parse the hints from a leading comment.
pub fn parse_hints(comment: &str) -> Vec<Hint> {
    let mut hints = Vec::new();
    for line in comment.lines() {
        let line = line.trim_start_matches('/').trim();
        let Some(rest) = line.strip_prefix("tscpp:") else {
            continue;
        };
        for word in rest.split(',') {
            if word.trim() == "persistent" {
                hints.push(Hint::Persistent);
            }
        }
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_persistent() {
        assert_eq!(parse_hints("// tscpp: persistent"), vec![Hint::Persistent]);
    }

    #[test]
    fn ignores_unrelated_comments() {
        assert!(parse_hints("// keeps the cache alive").is_empty());
        assert!(parse_hints("// tscpp: frobnicate").is_empty());
    }

    #[test]
    fn parses_multiline_comments() {
        let comment = "// owned by the scheduler\n// tscpp: persistent";
        assert_eq!(parse_hints(comment), vec![Hint::Persistent]);
    }
}
