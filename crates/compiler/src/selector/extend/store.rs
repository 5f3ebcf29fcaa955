use std::collections::{BTreeSet, VecDeque};

use codemap::Span;

use crate::{
    selector::{Selector, SelectorFragment},
    InputSyntax,
};

use super::{
    extended_selector::ExtendedSelector,
    graph::{ExtendGraph, RequestId, SelectorNode},
    marker::{parse_targets, take_trailing_extends, BodyMarker, MarkerKind},
    ExtendRequest, MatchMode, Visibility,
};

/// Application stops after this many rounds even if new selectors are still
/// being produced. Anything past it is dropped.
pub(crate) const MAX_EXTEND_ROUNDS: usize = 100;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct RuleId(usize);

/// An at-rule with a body. Used to scope LESS extends.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct ContainerId(usize);

#[derive(Debug)]
struct Rule {
    selectors: ExtendedSelector,

    /// The rules whose requests produced each selector, parallel to
    /// `selectors`. Empty for selectors that were written by the author.
    origins: Vec<BTreeSet<RuleId>>,

    /// Enclosing containers, outermost first
    containers: Vec<ContainerId>,

    markers: Vec<BodyMarker>,

    span: Span,
}

/// Every style rule of a stylesheet along with the extends written in them.
///
/// Rules are registered while the tree is built. Nothing is applied until
/// [`ExtensionStore::resolve`] is called once the whole stylesheet has been
/// visited, since a rule may extend selectors declared after it.
#[derive(Debug)]
pub(crate) struct ExtensionStore {
    syntax: InputSyntax,
    rules: Vec<Rule>,
    containers: usize,
}

impl ExtensionStore {
    pub fn new(syntax: InputSyntax) -> Self {
        Self {
            syntax,
            rules: Vec::new(),
            containers: 0,
        }
    }

    pub fn add_container(&mut self) -> ContainerId {
        self.containers += 1;
        ContainerId(self.containers - 1)
    }

    /// Register a style rule with its nesting-resolved selectors. The returned
    /// [`ExtendedSelector`] is what the CSS tree should hold on to.
    pub fn add_rule(
        &mut self,
        selectors: Vec<Selector>,
        containers: Vec<ContainerId>,
        span: Span,
    ) -> (RuleId, ExtendedSelector) {
        let origins = vec![BTreeSet::new(); selectors.len()];
        let extended = ExtendedSelector::new(selectors);

        self.rules.push(Rule {
            selectors: extended.clone(),
            origins,
            containers,
            markers: Vec::new(),
            span,
        });

        (RuleId(self.rules.len() - 1), extended)
    }

    pub fn add_marker(&mut self, rule: RuleId, marker: BodyMarker) {
        self.rules[rule.0].markers.push(marker);
    }

    /// Collect every extend in the stylesheet, then apply them until no new
    /// selectors are produced
    pub fn resolve(&mut self) {
        let requests = self.collect();

        if !requests.is_empty() {
            self.apply(&requests);
        }
    }

    /// Turn markers into requests, one per target. Trailing `:extend(...)`
    /// pseudos are stripped from their selectors here.
    fn collect(&self) -> Vec<ExtendRequest> {
        let mut requests = Vec::new();

        for (idx, rule) in self.rules.iter().enumerate() {
            let requester = RuleId(idx);

            if self.syntax == InputSyntax::Less {
                for index in 0..rule.selectors.len() {
                    let selector = match rule.selectors.get(index) {
                        Some(selector) => selector,
                        None => continue,
                    };

                    let (stripped, targets) = match take_trailing_extends(&selector, rule.span) {
                        Some(extends) => extends,
                        None => continue,
                    };

                    rule.selectors.replace(index, stripped.clone());

                    requests.extend(targets.into_iter().map(|target| ExtendRequest {
                        requester,
                        extend_with: stripped.clone(),
                        target: target.selector,
                        mode: target.mode,
                        visibility: Visibility::Branch,
                    }));
                }
            }

            for marker in &rule.markers {
                let (allows_all, visibility) = match marker.kind {
                    MarkerKind::Less => (true, Visibility::Branch),
                    MarkerKind::Scss => (false, Visibility::Document),
                };

                let targets = match parse_targets(&marker.text, marker.span, allows_all) {
                    Some(targets) => targets,
                    None => continue,
                };

                for extend_with in rule.selectors.selectors().iter() {
                    for target in &targets {
                        requests.push(ExtendRequest {
                            requester,
                            extend_with: extend_with.clone(),
                            target: target.selector.clone(),
                            mode: target.mode,
                            visibility,
                        });
                    }
                }
            }
        }

        requests
    }

    /// Apply requests round by round. Each round visits the selectors
    /// produced by the previous one, in the order they were produced.
    fn apply(&mut self, requests: &[ExtendRequest]) {
        let mut graph = ExtendGraph::new();
        let mut worklist = VecDeque::new();

        for (idx, rule) in self.rules.iter().enumerate() {
            for (index, selector) in rule.selectors.selectors().iter().enumerate() {
                let node = SelectorNode {
                    rule: RuleId(idx),
                    index,
                };

                if graph.insert(node, self.satisfied_requests(requests, rule, selector)) {
                    worklist.push_back(node);
                }
            }
        }

        let mut rounds = 0;

        while !worklist.is_empty() && rounds < MAX_EXTEND_ROUNDS {
            rounds += 1;

            let mut produced_nodes = VecDeque::new();

            while let Some(node) = worklist.pop_front() {
                for &RequestId(request_idx) in graph.edges(node).to_vec().iter() {
                    let request = &requests[request_idx];
                    let rule = &mut self.rules[node.rule.0];

                    if rule.origins[node.index].contains(&request.requester) {
                        continue;
                    }

                    let matched = match rule.selectors.get(node.index) {
                        Some(selector) => selector,
                        None => continue,
                    };

                    // a rule never extends the selector it extends with
                    if node.rule == request.requester && matched == request.extend_with {
                        continue;
                    }

                    let produced = match request.mode {
                        MatchMode::Strict => request.extend_with.clone(),
                        MatchMode::Substring => {
                            replace_all(&matched, &request.target, &request.extend_with)
                        }
                    };

                    if produced.is_empty() || rule.selectors.contains(&produced) {
                        continue;
                    }

                    let mut origins = rule.origins[node.index].clone();
                    origins.insert(request.requester);

                    let index = rule.selectors.push(produced.clone());
                    rule.origins.push(origins);

                    let produced_node = SelectorNode {
                        rule: node.rule,
                        index,
                    };

                    let rule = &self.rules[node.rule.0];
                    if graph.insert(
                        produced_node,
                        self.satisfied_requests(requests, rule, &produced),
                    ) {
                        produced_nodes.push_back(produced_node);
                    }
                }
            }

            worklist = produced_nodes;
        }
    }

    /// The requests `selector`, a member of `rule`, can be extended by
    fn satisfied_requests(
        &self,
        requests: &[ExtendRequest],
        rule: &Rule,
        selector: &Selector,
    ) -> Vec<RequestId> {
        requests
            .iter()
            .enumerate()
            .filter(|(_, request)| self.is_visible(request, rule))
            .filter(|(_, request)| match request.mode {
                MatchMode::Strict => *selector == request.target,
                MatchMode::Substring => selector.find(&request.target, 0).is_some(),
            })
            .map(|(idx, _)| RequestId(idx))
            .collect()
    }

    fn is_visible(&self, request: &ExtendRequest, candidate: &Rule) -> bool {
        match request.visibility {
            Visibility::Document => true,
            Visibility::Branch => candidate
                .containers
                .starts_with(&self.rules[request.requester.0].containers),
        }
    }
}

/// Replace every non-overlapping occurrence of `target`, scanning left to
/// right and resuming after each replacement
fn replace_all(selector: &Selector, target: &Selector, replacement: &Selector) -> Selector {
    let fragments = selector.fragments();
    let mut parts: Vec<&[SelectorFragment]> = Vec::new();
    let mut last = 0;

    while let Some(start) = selector.find(target, last) {
        parts.push(&fragments[last..start]);
        parts.push(replacement.fragments());
        last = start + target.len();
    }

    parts.push(&fragments[last..]);

    Selector::concat(&parts)
}

#[cfg(test)]
mod test {
    use codemap::{CodeMap, Span};

    use super::{replace_all, ExtensionStore, RuleId, MAX_EXTEND_ROUNDS};
    use crate::{
        selector::{BodyMarker, MarkerKind, Selector, SelectorParser},
        InputSyntax,
    };

    fn span() -> Span {
        let mut map = CodeMap::new();
        map.add_file("test".to_owned(), String::new()).span
    }

    fn list(text: &str) -> Vec<Selector> {
        SelectorParser::from_text(text, true, true, span())
            .parse()
            .unwrap()
    }

    fn texts(store: &ExtensionStore, rule: RuleId) -> Vec<String> {
        store.rules[rule.0]
            .selectors
            .selectors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn marker(kind: MarkerKind, text: &str) -> BodyMarker {
        BodyMarker {
            kind,
            text: text.to_owned(),
            span: span(),
        }
    }

    #[test]
    fn triangle_terminates_without_self_copies() {
        let mut store = ExtensionStore::new(InputSyntax::Less);
        let (x, _) = store.add_rule(list(".x:extend(.z)"), Vec::new(), span());
        let (y, _) = store.add_rule(list(".y:extend(.x)"), Vec::new(), span());
        let (z, _) = store.add_rule(list(".z:extend(.y)"), Vec::new(), span());

        store.resolve();

        assert_eq!(texts(&store, x), vec![".x", ".y", ".z"]);
        assert_eq!(texts(&store, y), vec![".y", ".z", ".x"]);
        assert_eq!(texts(&store, z), vec![".z", ".x", ".y"]);
    }

    #[test]
    fn self_extend_adds_nothing() {
        let mut store = ExtensionStore::new(InputSyntax::Scss);
        let (a, _) = store.add_rule(list(".a"), Vec::new(), span());
        store.add_marker(a, marker(MarkerKind::Scss, ".a"));

        store.resolve();

        assert_eq!(texts(&store, a), vec![".a"]);
    }

    #[test]
    fn all_does_not_rewrite_own_selector() {
        let mut store = ExtensionStore::new(InputSyntax::Less);
        let (body, _) = store.add_rule(list(".a .b"), Vec::new(), span());
        store.add_marker(body, marker(MarkerKind::Less, ".b all"));
        let (trailing, _) = store.add_rule(list(".c .d:extend(.d all)"), Vec::new(), span());

        store.resolve();

        assert_eq!(texts(&store, body), vec![".a .b"]);
        assert_eq!(texts(&store, trailing), vec![".c .d"]);
    }

    #[test]
    fn all_still_rewrites_sibling_selector() {
        let mut store = ExtensionStore::new(InputSyntax::Less);
        let (rule, _) = store.add_rule(list(".a .b, .c"), Vec::new(), span());
        store.add_marker(rule, marker(MarkerKind::Less, ".b all"));

        store.resolve();

        assert_eq!(texts(&store, rule), vec![".a .b", ".c", ".a .c"]);
    }

    #[test]
    fn diamond_does_not_duplicate() {
        let mut store = ExtensionStore::new(InputSyntax::Scss);
        let (top, _) = store.add_rule(list(".top"), Vec::new(), span());
        let (left, _) = store.add_rule(list(".left"), Vec::new(), span());
        let (right, _) = store.add_rule(list(".right"), Vec::new(), span());
        let (bottom, _) = store.add_rule(list(".bottom"), Vec::new(), span());
        store.add_marker(left, marker(MarkerKind::Scss, ".top"));
        store.add_marker(right, marker(MarkerKind::Scss, ".top"));
        store.add_marker(bottom, marker(MarkerKind::Scss, ".left, .right"));

        store.resolve();

        assert_eq!(texts(&store, top), vec![".top", ".left", ".right", ".bottom"]);
    }

    #[test]
    fn branch_visibility() {
        let mut store = ExtensionStore::new(InputSyntax::Less);
        let media = store.add_container();
        let (outside, _) = store.add_rule(list(".a"), Vec::new(), span());
        let (inside, _) = store.add_rule(list(".a"), vec![media], span());
        let (scoped, _) = store.add_rule(list(".b"), vec![media], span());
        let (global, _) = store.add_rule(list(".c"), Vec::new(), span());
        store.add_marker(scoped, marker(MarkerKind::Less, ".a"));
        store.add_marker(global, marker(MarkerKind::Less, ".a"));

        store.resolve();

        assert_eq!(texts(&store, outside), vec![".a", ".c"]);
        assert_eq!(texts(&store, inside), vec![".a", ".b", ".c"]);
    }

    #[test]
    fn ceiling_truncates_long_chains() {
        let mut store = ExtensionStore::new(InputSyntax::Scss);
        let len = MAX_EXTEND_ROUNDS + 50;

        let rules: Vec<RuleId> = (0..=len)
            .map(|idx| store.add_rule(list(&format!(".s{}", idx)), Vec::new(), span()).0)
            .collect();

        for idx in 0..len {
            store.add_marker(rules[idx], marker(MarkerKind::Scss, &format!(".s{}", idx + 1)));
        }

        store.resolve();

        assert_eq!(texts(&store, rules[50]).len(), 51);
        assert_eq!(texts(&store, rules[len]).len(), MAX_EXTEND_ROUNDS + 1);
    }

    #[test]
    fn substring_replaces_every_occurrence() {
        let selector = list(".a .b > .a.c").remove(0);
        let target = list(".a").remove(0);
        let replacement = list(".x .y").remove(0);

        assert_eq!(
            replace_all(&selector, &target, &replacement).to_string(),
            ".x .y .b > .x .y.c"
        );
    }
}
