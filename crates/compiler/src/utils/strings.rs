/// Collapse every run of whitespace outside of quoted strings into a single
/// space and trim both ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            buffer.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    buffer.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_ascii_whitespace() {
            pending_space = !buffer.is_empty();
            continue;
        }

        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        }

        buffer.push(c);
    }

    buffer
}

/// Strip one layer of matching quotes, if present.
pub(crate) fn unquote(s: &str) -> &str {
    let s = s.trim();
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(a @ ('"' | '\'')), Some(b)) if a == b && s.len() >= 2 => &s[1..s.len() - 1],
        _ => s,
    }
}

/// Split `s` at every `sep` that is not inside quotes or brackets, trimming
/// each part. Empty parts are dropped.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(current.trim().to_owned());
                current.clear();
                continue;
            }
            _ => {}
        }

        current.push(c);
    }

    parts.push(current.trim().to_owned());
    parts.retain(|part| !part.is_empty());

    parts
}

/// `-webkit-keyframes` -> `keyframes`
pub(crate) fn unvendor(name: &str) -> &str {
    let bytes = name.as_bytes();

    if bytes.len() < 2 || bytes[0] != b'-' || bytes[1] == b'-' {
        return name;
    }

    match name[1..].find('-') {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

#[cfg(test)]
mod test {
    use super::{collapse_whitespace, split_top_level, unquote, unvendor};

    #[test]
    fn collapses_runs_outside_strings() {
        assert_eq!(collapse_whitespace("  1px \n\t solid   red "), "1px solid red");
        assert_eq!(collapse_whitespace("\"a   b\"  c"), "\"a   b\" c");
        assert_eq!(collapse_whitespace("'x\\'  y'   z"), "'x\\'  y' z");
    }

    #[test]
    fn unquote_only_strips_matching_pairs() {
        assert_eq!(unquote("\"hello\""), "hello");
        assert_eq!(unquote("'hello'"), "hello");
        assert_eq!(unquote("\"hello'"), "\"hello'");
        assert_eq!(unquote("hello"), "hello");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn splits_outside_brackets_and_strings() {
        assert_eq!(
            split_top_level("a, f(b, c), \"d,e\" ,", ','),
            vec!["a", "f(b, c)", "\"d,e\""]
        );
    }

    #[test]
    fn unvendor_strips_one_prefix() {
        assert_eq!(unvendor("-webkit-keyframes"), "keyframes");
        assert_eq!(unvendor("-moz-keyframes"), "keyframes");
        assert_eq!(unvendor("keyframes"), "keyframes");
        assert_eq!(unvendor("--custom"), "--custom");
        assert_eq!(unvendor("-x"), "-x");
    }
}
