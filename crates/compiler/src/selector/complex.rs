use std::{
    fmt::{self, Display},
    ops::Range,
};

use super::SelectorFragment;

/// One selector of a comma-separated list: an immutable, normalized sequence
/// of fragments.
///
/// Normalization drops leading and trailing whitespace, collapses runs of
/// whitespace, and removes whitespace next to explicit combinators, so that
/// `a>b`, `a > b` and `a  >b` are all equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selector {
    fragments: Vec<SelectorFragment>,
}

impl Selector {
    pub fn new(fragments: Vec<SelectorFragment>) -> Self {
        let mut normalized: Vec<SelectorFragment> = Vec::with_capacity(fragments.len());

        for fragment in fragments {
            match fragment {
                SelectorFragment::Whitespace => {
                    if matches!(
                        normalized.last(),
                        None | Some(SelectorFragment::Whitespace | SelectorFragment::Combinator(..))
                    ) {
                        continue;
                    }
                    normalized.push(fragment);
                }
                SelectorFragment::Combinator(..) => {
                    if normalized.last().map_or(false, SelectorFragment::is_whitespace) {
                        normalized.pop();
                    }
                    normalized.push(fragment);
                }
                fragment => normalized.push(fragment),
            }
        }

        if normalized.last().map_or(false, SelectorFragment::is_whitespace) {
            normalized.pop();
        }

        Self {
            fragments: normalized,
        }
    }

    /// Stitch a selector together from pieces of others without re-parsing
    pub fn concat(parts: &[&[SelectorFragment]]) -> Self {
        let len = parts.iter().map(|part| part.len()).sum();
        let mut fragments = Vec::with_capacity(len);
        for part in parts {
            fragments.extend_from_slice(part);
        }
        Self::new(fragments)
    }

    pub fn fragments(&self) -> &[SelectorFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn last(&self) -> Option<&SelectorFragment> {
        self.fragments.last()
    }

    /// The fragments in `range`, exactly as they are. Unlike [`Selector::new`]
    /// this does not re-normalize, so offsets into the result line up with
    /// offsets into `self`.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            fragments: self.fragments[range].to_vec(),
        }
    }

    /// Replace the fragments in `range` with those of `replacement`
    pub fn splice(&self, range: Range<usize>, replacement: &Selector) -> Self {
        Self::concat(&[
            &self.fragments[..range.start],
            replacement.fragments(),
            &self.fragments[range.end..],
        ])
    }

    /// The offset of the first occurrence of `needle` at or after `from`
    pub fn find(&self, needle: &Selector, from: usize) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.len() {
            return None;
        }

        (from..=self.len() - needle.len())
            .find(|&start| self.fragments[start..start + needle.len()] == needle.fragments[..])
    }

    /// Offsets of every `&`
    pub fn nesting_offsets(&self) -> Vec<usize> {
        self.fragments
            .iter()
            .enumerate()
            .filter(|(_, fragment)| fragment.is_nesting())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Placeholder selectors only exist to be extended and are never emitted
    pub fn is_invisible(&self) -> bool {
        self.fragments.iter().any(SelectorFragment::is_placeholder)
    }

    pub fn write(&self, buf: &mut String, compressed: bool) {
        for (idx, fragment) in self.fragments.iter().enumerate() {
            if fragment.is_combinator() && !compressed {
                if idx != 0 {
                    buf.push(' ');
                }
                fragment.write(buf);
                if idx + 1 != self.fragments.len() {
                    buf.push(' ');
                }
            } else {
                fragment.write(buf);
            }
        }
    }

    pub fn to_css_string(&self, compressed: bool) -> String {
        let mut buf = String::new();
        self.write(&mut buf, compressed);
        buf
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string(false))
    }
}

#[cfg(test)]
mod test {
    use super::Selector;
    use crate::selector::{Combinator, SelectorFragment};

    fn class(name: &str) -> SelectorFragment {
        SelectorFragment::Class(name.into())
    }

    #[test]
    fn normalizes_whitespace_around_combinators() {
        let selector = Selector::new(vec![
            SelectorFragment::Whitespace,
            class("a"),
            SelectorFragment::Whitespace,
            SelectorFragment::Whitespace,
            SelectorFragment::Combinator(Combinator::Child),
            SelectorFragment::Whitespace,
            class("b"),
            SelectorFragment::Whitespace,
        ]);

        assert_eq!(selector.len(), 3);
        assert_eq!(selector.to_string(), ".a > .b");
        assert_eq!(selector.to_css_string(true), ".a>.b");
    }

    #[test]
    fn leading_combinator_has_no_leading_space() {
        let selector = Selector::new(vec![
            SelectorFragment::Combinator(Combinator::NextSibling),
            class("a"),
        ]);
        assert_eq!(selector.to_string(), "+ .a");
    }

    #[test]
    fn find_and_splice() {
        let haystack = Selector::new(vec![
            class("a"),
            SelectorFragment::Whitespace,
            class("b"),
            SelectorFragment::Whitespace,
            class("a"),
        ]);
        let needle = Selector::new(vec![class("a")]);

        assert_eq!(haystack.find(&needle, 0), Some(0));
        assert_eq!(haystack.find(&needle, 1), Some(4));
        assert_eq!(haystack.find(&needle, 5), None);
        assert_eq!(haystack.find(&Selector::default(), 0), None);

        let replaced = haystack.splice(2..3, &Selector::new(vec![class("c"), class("d")]));
        assert_eq!(replaced.to_string(), ".a .c.d .a");
    }

    #[test]
    fn slice_keeps_offsets() {
        let selector = Selector::new(vec![class("a"), SelectorFragment::Whitespace, class("b")]);
        let head = selector.slice(0..2);
        assert_eq!(head.len(), 2);
        assert!(head.fragments()[1].is_whitespace());
    }
}
