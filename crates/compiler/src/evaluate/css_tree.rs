use std::collections::BTreeMap;

use crate::ast::CssStmt;

/// The output tree while it is being built.
///
/// Statements live in an arena and only know their parent by index, so a
/// child can still be added to a rule after later siblings of that rule were
/// written. [`CssTree::finish`] moves every child into its parent's body.
#[derive(Debug, Clone)]
pub(super) struct CssTree {
    // `None` at the root and once a statement has been moved out
    stmts: Vec<Option<CssStmt>>,
    children: BTreeMap<CssTreeIdx, Vec<CssTreeIdx>>,
    parents: BTreeMap<CssTreeIdx, CssTreeIdx>,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[repr(transparent)]
pub(super) struct CssTreeIdx(usize);

impl CssTree {
    pub const ROOT: CssTreeIdx = CssTreeIdx(0);

    pub fn new() -> Self {
        Self {
            stmts: vec![None],
            children: BTreeMap::new(),
            parents: BTreeMap::new(),
        }
    }

    pub fn get(&self, idx: CssTreeIdx) -> Option<&CssStmt> {
        self.stmts[idx.0].as_ref()
    }

    pub fn get_mut(&mut self, idx: CssTreeIdx) -> Option<&mut CssStmt> {
        self.stmts[idx.0].as_mut()
    }

    pub fn parent_of(&self, idx: CssTreeIdx) -> Option<CssTreeIdx> {
        self.parents.get(&idx).copied()
    }

    pub fn last_child(&self, idx: CssTreeIdx) -> Option<CssTreeIdx> {
        self.children.get(&idx)?.last().copied()
    }

    pub fn add_child(&mut self, child: CssStmt, parent: CssTreeIdx) -> CssTreeIdx {
        let idx = CssTreeIdx(self.stmts.len());
        self.stmts.push(Some(child));
        self.children.entry(parent).or_default().push(idx);
        self.parents.insert(idx, parent);
        idx
    }

    pub fn add_stmt(&mut self, child: CssStmt, parent: Option<CssTreeIdx>) -> CssTreeIdx {
        self.add_child(child, parent.unwrap_or(Self::ROOT))
    }

    /// Whether anything was written after `idx` inside the same parent
    pub fn has_following_sibling(&self, idx: CssTreeIdx) -> bool {
        if idx == Self::ROOT {
            return false;
        }

        // todo: we shouldn't take into account children that are invisible
        self.parent_of(idx)
            .and_then(|parent| self.last_child(parent))
            .map_or(false, |last| last != idx)
    }

    /// The top-level statements, each holding its descendants
    pub fn finish(mut self) -> Vec<CssStmt> {
        self.take_children(Self::ROOT)
    }

    fn take_children(&mut self, parent: CssTreeIdx) -> Vec<CssStmt> {
        let children = self.children.remove(&parent).unwrap_or_default();
        let mut stmts = Vec::with_capacity(children.len());

        for child in children {
            let mut stmt = match self.stmts[child.0].take() {
                Some(stmt) => stmt,
                None => continue,
            };

            let body = self.take_children(child);
            if !body.is_empty() {
                append_body(&mut stmt, body);
            }

            stmts.push(stmt);
        }

        stmts
    }
}

fn append_body(parent: &mut CssStmt, children: Vec<CssStmt>) {
    match parent {
        CssStmt::RuleSet { body, .. } => body.extend(children),
        CssStmt::Media(media, ..) => media.body.extend(children),
        CssStmt::UnknownAtRule(at_rule, ..) => at_rule.body.extend(children),
        CssStmt::KeyframesRuleSet(keyframes) => keyframes.body.extend(children),
        CssStmt::Style(..) | CssStmt::Comment(..) => unreachable!("leaf statements have no children"),
    }
}

#[cfg(test)]
mod test {
    use crate::ast::{CssStmt, Style};
    use crate::interner::InternedString;
    use crate::selector::ExtendedSelector;

    use super::CssTree;

    fn rule() -> CssStmt {
        CssStmt::RuleSet {
            selector: ExtendedSelector::new(Vec::new()),
            body: Vec::new(),
            is_group_end: false,
        }
    }

    fn style(name: &str) -> CssStmt {
        CssStmt::Style(Style {
            property: InternedString::get_or_intern(name),
            value: "0".to_owned(),
        })
    }

    #[test]
    fn children_added_late_keep_their_parent() {
        let mut tree = CssTree::new();
        let a = tree.add_stmt(rule(), None);
        let b = tree.add_stmt(rule(), None);
        tree.add_child(style("x"), a);
        tree.add_child(style("y"), b);

        assert!(tree.has_following_sibling(a));
        assert!(!tree.has_following_sibling(b));

        let stmts = tree.finish();
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[0], CssStmt::RuleSet { body, .. } if body.len() == 1));
        assert!(matches!(&stmts[1], CssStmt::RuleSet { body, .. } if body.len() == 1));
    }

    #[test]
    fn root_never_has_siblings() {
        let tree = CssTree::new();
        assert!(!tree.has_following_sibling(CssTree::ROOT));
    }
}
