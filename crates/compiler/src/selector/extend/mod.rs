pub(crate) use extended_selector::ExtendedSelector;
pub(crate) use marker::{strip_extends, BodyMarker, MarkerKind};
pub(crate) use store::{ContainerId, ExtensionStore, RuleId};

use super::Selector;

mod extended_selector;
mod graph;
mod marker;
mod store;

/// How a target is matched against the selectors of candidate rules
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum MatchMode {
    /// The whole candidate selector must equal the target.
    ///
    /// This is the only mode available to `@extend`.
    Strict,

    /// The target may occur anywhere inside the candidate, and every
    /// occurrence is replaced. Selected by a trailing `all` in LESS.
    Substring,
}

/// Which rules a request may be applied to
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Visibility {
    /// Every rule in the stylesheet (`@extend`)
    Document,

    /// Rules in the at-rule subtree the requesting rule was written in
    /// (`:extend`)
    Branch,
}

/// One target of one extend marker
#[derive(Clone, Debug)]
struct ExtendRequest {
    requester: RuleId,
    extend_with: Selector,
    target: Selector,
    mode: MatchMode,
    visibility: Visibility,
}
