use codemap::Span;

use crate::selector::{Selector, SelectorFragment, SelectorParser};

use super::MatchMode;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MarkerKind {
    /// `&:extend(...);`
    Less,

    /// `@extend ...;`
    Scss,
}

/// An extend written as a statement in a rule body. `text` is the raw target
/// list, without the surrounding `&:extend(` and `)` or the `!optional` flag.
#[derive(Clone, Debug)]
pub(crate) struct BodyMarker {
    pub kind: MarkerKind,
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub(super) struct ExtendTarget {
    pub selector: Selector,
    pub mode: MatchMode,
}

/// Split a target list into targets. Returns `None` if any member is empty or
/// cannot be tokenized, in which case the marker as a whole is ignored.
pub(super) fn parse_targets(text: &str, span: Span, allows_all: bool) -> Option<Vec<ExtendTarget>> {
    let list = SelectorParser::from_text(text, false, true, span)
        .parse()
        .ok()?;

    Some(
        list.into_iter()
            .map(|selector| {
                if allows_all {
                    if let Some(stripped) = strip_all_keyword(&selector) {
                        return ExtendTarget {
                            selector: stripped,
                            mode: MatchMode::Substring,
                        };
                    }
                }

                ExtendTarget {
                    selector,
                    mode: MatchMode::Strict,
                }
            })
            .collect(),
    )
}

/// `.a all` becomes `.a`. The keyword has to be a separate compound, so
/// `.a > all` still targets an `<all>` element.
fn strip_all_keyword(selector: &Selector) -> Option<Selector> {
    let fragments = selector.fragments();

    match fragments {
        [rest @ .., SelectorFragment::Whitespace, SelectorFragment::Type(name)]
            if name.eq_ignore_ascii_case("all") && !rest.is_empty() =>
        {
            Some(Selector::new(rest.to_vec()))
        }
        _ => None,
    }
}

/// Remove any number of trailing `:extend(...)` pseudos from `selector`.
///
/// Returns the stripped selector and the targets of every marker, in source
/// order. If a marker is malformed, or nothing would be left of the selector,
/// the selector is not treated as extending anything.
pub(super) fn take_trailing_extends(
    selector: &Selector,
    span: Span,
) -> Option<(Selector, Vec<ExtendTarget>)> {
    let fragments = selector.fragments();
    let mut end = fragments.len();
    let mut markers = Vec::new();

    while end > 0 {
        match &fragments[end - 1] {
            SelectorFragment::Pseudo(pseudo) if pseudo.is_extend() => {
                markers.push(pseudo.argument.as_deref()?);
                end -= 1;
            }
            _ => break,
        }
    }

    if markers.is_empty() {
        return None;
    }

    let stripped = Selector::new(fragments[..end].to_vec());

    if stripped.is_empty() {
        return None;
    }

    let mut targets = Vec::new();
    for argument in markers.into_iter().rev() {
        targets.extend(parse_targets(argument, span, true)?);
    }

    Some((stripped, targets))
}

/// The selectors a rule's children nest under: trailing extend markers are
/// not part of the rule's identity.
pub(crate) fn strip_extends(selectors: &[Selector], span: Span) -> Vec<Selector> {
    selectors
        .iter()
        .map(|selector| match take_trailing_extends(selector, span) {
            Some((stripped, ..)) => stripped,
            None => selector.clone(),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use codemap::{CodeMap, Span};

    use super::{parse_targets, take_trailing_extends};
    use crate::selector::{extend::MatchMode, Selector, SelectorParser};

    fn span() -> Span {
        let mut map = CodeMap::new();
        map.add_file("test".to_owned(), String::new()).span
    }

    fn selector(text: &str) -> Selector {
        let mut list = SelectorParser::from_text(text, true, true, span())
            .parse()
            .unwrap();
        list.remove(0)
    }

    #[test]
    fn all_keyword_selects_substring_mode() {
        let targets = parse_targets(".a all, .b, .c > all", span(), true).unwrap();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].selector.to_string(), ".a");
        assert_eq!(targets[0].mode, MatchMode::Substring);
        assert_eq!(targets[1].mode, MatchMode::Strict);
        assert_eq!(targets[2].selector.to_string(), ".c > all");
        assert_eq!(targets[2].mode, MatchMode::Strict);
    }

    #[test]
    fn all_keyword_is_plain_text_for_scss() {
        let targets = parse_targets(".a all", span(), false).unwrap();
        assert_eq!(targets[0].selector.to_string(), ".a all");
        assert_eq!(targets[0].mode, MatchMode::Strict);
    }

    #[test]
    fn malformed_target_lists() {
        assert!(parse_targets("", span(), true).is_none());
        assert!(parse_targets(".a,", span(), true).is_none());
        assert!(parse_targets(".a, ,.b", span(), true).is_none());
    }

    #[test]
    fn several_trailing_markers() {
        let (stripped, targets) =
            take_trailing_extends(&selector("a:hover:extend(.b):extend(.c all)"), span()).unwrap();
        assert_eq!(stripped.to_string(), "a:hover");
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].selector.to_string(), ".b");
        assert_eq!(targets[1].mode, MatchMode::Substring);
    }

    #[test]
    fn marker_must_be_trailing() {
        assert!(take_trailing_extends(&selector("a:extend(.b) .c"), span()).is_none());
        assert!(take_trailing_extends(&selector(":extend(.b)"), span()).is_none());
        assert!(take_trailing_extends(&selector("a:extend()"), span()).is_none());
    }
}
