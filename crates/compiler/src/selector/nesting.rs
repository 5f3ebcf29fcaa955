use indexmap::IndexSet;

use super::{Selector, SelectorFragment};

/// Fold the selector lists of an ancestor chain, outermost first, into the
/// final selector list of the innermost rule
#[cfg(test)]
pub(crate) fn resolve_nesting(path: &[Vec<Selector>]) -> Vec<Selector> {
    path.iter()
        .fold(vec![Selector::default()], |parent, current| {
            combine(&parent, current, true)
        })
}

/// Combine the already resolved selectors of a parent rule with the raw
/// selectors of a child rule.
///
/// Selectors without `&` are prefixed with every parent alternative when
/// `implicit_parent` is set, and left alone otherwise (inside `@at-root`).
/// A selector with `k` references expands to all `n^k` choices of parent
/// alternatives.
///
/// The expansions of each member of `current` are interleaved round-robin,
/// so that `a, b { &:x, &:y {} }` yields `a:x, a:y, b:x, b:y`. Empty results
/// and textual duplicates are dropped.
pub(crate) fn combine(
    parent: &[Selector],
    current: &[Selector],
    implicit_parent: bool,
) -> Vec<Selector> {
    let root = [Selector::default()];
    let parent = if parent.is_empty() { &root[..] } else { parent };

    let expansions: Vec<Vec<Selector>> = current
        .iter()
        .map(|selector| expand(parent, selector, implicit_parent))
        .collect();

    let longest = expansions.iter().map(Vec::len).max().unwrap_or(0);

    let mut seen = IndexSet::new();
    let mut resolved = Vec::new();

    for round in 0..longest {
        for expansion in &expansions {
            let selector = match expansion.get(round) {
                Some(selector) => selector,
                None => continue,
            };

            if seen.insert(selector.to_string()) {
                resolved.push(selector.clone());
            }
        }
    }

    resolved
}

fn expand(parent: &[Selector], selector: &Selector, implicit_parent: bool) -> Vec<Selector> {
    let offsets = selector.nesting_offsets();

    if offsets.is_empty() {
        if !implicit_parent {
            return vec![selector.clone()];
        }

        return parent
            .iter()
            .map(|prefix| {
                Selector::concat(&[
                    prefix.fragments(),
                    &[SelectorFragment::Whitespace],
                    selector.fragments(),
                ])
            })
            .filter(|selector| !selector.is_empty())
            .collect();
    }

    let mut choices = vec![0_usize; offsets.len()];
    let mut expanded = Vec::new();

    loop {
        let substituted = substitute(selector, &offsets, &choices, parent);
        if !substituted.is_empty() {
            expanded.push(substituted);
        }

        // odometer, last reference turning fastest
        let mut slot = choices.len();
        loop {
            if slot == 0 {
                return expanded;
            }
            slot -= 1;
            choices[slot] += 1;
            if choices[slot] < parent.len() {
                break;
            }
            choices[slot] = 0;
        }
    }
}

/// Replace each `&` at `offsets` with the parent alternative chosen for it.
/// The offsets index the unsubstituted selector, so they are consumed in a
/// single left-to-right pass.
fn substitute(
    selector: &Selector,
    offsets: &[usize],
    choices: &[usize],
    parent: &[Selector],
) -> Selector {
    let fragments = selector.fragments();
    let mut buf = Vec::with_capacity(fragments.len());
    let mut last = 0;

    for (&offset, &choice) in offsets.iter().zip(choices) {
        buf.extend_from_slice(&fragments[last..offset]);

        let replacement = &parent[choice];
        buf.extend_from_slice(replacement.fragments());

        if let SelectorFragment::Nesting {
            suffix: Some(suffix),
        } = &fragments[offset]
        {
            let glued = !replacement.is_empty()
                && buf
                    .last_mut()
                    .map_or(false, |fragment| fragment.push_suffix(suffix));

            if !glued {
                buf.push(SelectorFragment::Type(suffix.clone()));
            }
        }

        last = offset + 1;
    }

    buf.extend_from_slice(&fragments[last..]);

    Selector::new(buf)
}

#[cfg(test)]
mod test {
    use codemap::CodeMap;

    use super::{combine, resolve_nesting};
    use crate::selector::{Selector, SelectorParser};

    fn list(text: &str) -> Vec<Selector> {
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), text.to_owned());
        SelectorParser::from_text(text, true, true, file.span)
            .parse()
            .unwrap()
    }

    fn texts(selectors: &[Selector]) -> Vec<String> {
        selectors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn plain_descendants() {
        assert_eq!(
            texts(&resolve_nesting(&[list("a"), list("b"), list("c")])),
            vec!["a b c"]
        );
    }

    #[test]
    fn descendant_product_is_parent_major() {
        assert_eq!(
            texts(&resolve_nesting(&[list("a, b"), list("c, d")])),
            vec!["a c", "a d", "b c", "b d"]
        );
    }

    #[test]
    fn cartesian_references() {
        assert_eq!(
            texts(&resolve_nesting(&[list("A, B"), list("&:hover, &:focus")])),
            vec!["A:hover", "A:focus", "B:hover", "B:focus"]
        );
    }

    #[test]
    fn uneven_expansions_interleave() {
        assert_eq!(
            texts(&resolve_nesting(&[list("a, b"), list("&.x, & + &")])),
            vec!["a.x", "a + a", "b.x", "a + b", "b + a", "b + b"]
        );
    }

    #[test]
    fn suffix_is_glued_to_parent_name() {
        assert_eq!(
            texts(&resolve_nesting(&[list(".block"), list("&__elem, &-mod")])),
            vec![".block__elem", ".block-mod"]
        );
    }

    #[test]
    fn reference_may_appear_anywhere() {
        assert_eq!(
            texts(&resolve_nesting(&[list(".a"), list(".b &, .c > & .d")])),
            vec![".b .a", ".c > .a .d"]
        );
    }

    #[test]
    fn reference_at_root_is_dropped() {
        assert!(resolve_nesting(&[list("&")]).is_empty());
        assert_eq!(texts(&resolve_nesting(&[list("&:hover")])), vec![":hover"]);
    }

    #[test]
    fn duplicates_are_removed() {
        assert_eq!(
            texts(&resolve_nesting(&[list("a, a"), list("b")])),
            vec!["a b"]
        );
    }

    #[test]
    fn without_implicit_parent() {
        assert_eq!(texts(&combine(&list("a"), &list("b, & c"), false)), vec!["b", "a c"]);
    }
}
