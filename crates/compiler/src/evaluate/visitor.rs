use std::mem;

use codemap::{CodeMap, Span};

use crate::{
    ast::*,
    error::{GroutError, GroutResult},
    interner::InternedString,
    selector::{
        combine, strip_extends, BodyMarker, ContainerId, ExtensionStore, MarkerKind, RuleId,
        Selector, SelectorParser,
    },
    utils::{collapse_whitespace, unquote, unvendor},
    ContextFlags, InputSyntax, Options,
};

use super::css_tree::{CssTree, CssTreeIdx};

/// The innermost style rule being visited
#[derive(Debug, Clone)]
struct StyleRuleContext {
    /// Nesting-resolved, without LESS `:extend(...)` markers. This is what
    /// child rules are nested under.
    selectors: Vec<Selector>,

    /// Where extends written in the rule's body are recorded
    rule: RuleId,
}

/// Walks a parsed stylesheet, resolving nesting and building the flat CSS
/// tree. Every style rule is registered with [`ExtensionStore`] on the way.
pub(crate) struct Visitor<'a> {
    pub flags: ContextFlags,
    style_rule_ignoring_at_root: Option<StyleRuleContext>,
    media_queries: Option<String>,

    /// At-rules with a body enclosing the current statement, outermost first
    containers: Vec<ContainerId>,
    pub extender: ExtensionStore,
    syntax: InputSyntax,
    css_tree: CssTree,
    parent: Option<CssTreeIdx>,
    pub options: &'a Options<'a>,
    pub map: &'a CodeMap,
}

impl<'a> Visitor<'a> {
    pub fn new(options: &'a Options<'a>, map: &'a CodeMap, syntax: InputSyntax) -> Self {
        Self {
            flags: ContextFlags::empty(),
            style_rule_ignoring_at_root: None,
            media_queries: None,
            containers: Vec::new(),
            extender: ExtensionStore::new(syntax),
            syntax,
            css_tree: CssTree::new(),
            parent: None,
            options,
            map,
        }
    }

    pub fn visit_stylesheet(&mut self, style_sheet: StyleSheet) -> GroutResult<()> {
        self.visit_children(style_sheet.body)
    }

    pub fn finish(self) -> Vec<CssStmt> {
        self.css_tree.finish()
    }

    fn visit_children(&mut self, children: Vec<AstStmt>) -> GroutResult<()> {
        for stmt in children {
            self.visit_stmt(stmt)?;
        }

        Ok(())
    }

    pub fn visit_stmt(&mut self, stmt: AstStmt) -> GroutResult<()> {
        match stmt {
            AstStmt::RuleSet(ruleset) => self.visit_ruleset(ruleset),
            AstStmt::Style(style) => self.visit_style(style),
            AstStmt::Media(media_rule) => self.visit_media_rule(media_rule),
            AstStmt::UnknownAtRule(unknown_at_rule) => self.visit_unknown_at_rule(unknown_at_rule),
            AstStmt::Extend(extend_rule) => self.visit_extend_rule(extend_rule),
            AstStmt::AtRootRule(at_root_rule) => self.visit_at_root_rule(at_root_rule),
            AstStmt::LoudComment(comment) => {
                self.visit_loud_comment(comment);
                Ok(())
            }
            AstStmt::Debug(debug_rule) => {
                self.visit_debug_rule(debug_rule);
                Ok(())
            }
            AstStmt::Warn(warn_rule) => {
                self.visit_warn_rule(warn_rule);
                Ok(())
            }
            AstStmt::ErrorRule(error_rule) => Err(self.visit_error_rule(error_rule)),
        }
    }

    fn visit_at_root_rule(&mut self, at_root_rule: AstAtRootRule) -> GroutResult<()> {
        // the innermost ancestor that is not a style rule
        let mut root = self.parent;

        while let Some(idx) = root {
            let is_style_rule = self.css_tree.get(idx).map_or(false, CssStmt::is_style_rule);

            if !is_style_rule {
                break;
            }

            root = self.css_tree.parent_of(idx);
        }

        let old_parent = mem::replace(&mut self.parent, root);
        let old_at_root_excluding_style_rule = self.flags.at_root_excluding_style_rule();
        self.flags
            .set(ContextFlags::AT_ROOT_EXCLUDING_STYLE_RULE, true);

        let result = self.visit_children(at_root_rule.body);

        self.parent = old_parent;
        self.flags.set(
            ContextFlags::AT_ROOT_EXCLUDING_STYLE_RULE,
            old_at_root_excluding_style_rule,
        );

        result
    }

    fn visit_extend_rule(&mut self, extend_rule: AstExtendRule) -> GroutResult<()> {
        let rule = match &self.style_rule_ignoring_at_root {
            Some(context) if self.style_rule_exists() => Some(context.rule),
            _ => None,
        };

        let rule = match (rule, extend_rule.kind) {
            (Some(rule), _) => rule,
            (None, MarkerKind::Scss) => {
                return Err((
                    "@extend may only be used within style rules.",
                    extend_rule.span,
                )
                    .into())
            }
            (None, MarkerKind::Less) => {
                self.emit_warning(
                    "&:extend() is only allowed inside a rule and has been ignored.",
                    extend_rule.span,
                );
                return Ok(());
            }
        };

        self.extender.add_marker(
            rule,
            BodyMarker {
                kind: extend_rule.kind,
                text: extend_rule.value,
                span: extend_rule.span,
            },
        );

        Ok(())
    }

    fn visit_debug_rule(&mut self, debug_rule: AstDebugRule) {
        if self.options.quiet {
            return;
        }

        let loc = self.map.look_up_span(debug_rule.span);
        self.options
            .logger
            .debug(loc, unquote(&debug_rule.value));
    }

    fn visit_warn_rule(&mut self, warn_rule: AstWarn) {
        self.emit_warning(unquote(&warn_rule.value), warn_rule.span);
    }

    fn visit_error_rule(&self, error_rule: AstErrorRule) -> Box<GroutError> {
        (unquote(&error_rule.value).to_owned(), error_rule.span).into()
    }

    pub fn emit_warning(&mut self, message: &str, span: Span) {
        if self.options.quiet {
            return;
        }

        let loc = self.map.look_up_span(span);
        self.options.logger.warning(loc, message);
    }

    fn visit_media_rule(&mut self, media_rule: AstMedia) -> GroutResult<()> {
        let is_nested = self.media_queries.is_some();

        let query = match &self.media_queries {
            Some(outer) => merge_queries(outer, &media_rule.query),
            None => media_rule.query,
        };

        let stmt = CssStmt::Media(
            MediaRule {
                query: query.clone(),
                body: Vec::new(),
            },
            false,
        );

        let old_media_queries = self.media_queries.replace(query);
        let container = self.extender.add_container();
        self.containers.push(container);

        let children = media_rule.body;
        let span = media_rule.span;

        self.with_parent(
            stmt,
            |visitor| {
                if visitor.style_rule_exists() {
                    visitor.with_style_rule_copy(span, |visitor| visitor.visit_children(children))
                } else {
                    visitor.visit_children(children)
                }
            },
            // a nested @media is hoisted out of its parent @media, since their
            // queries were merged
            |stmt| match stmt {
                CssStmt::RuleSet { .. } => true,
                CssStmt::Media(..) => is_nested,
                _ => false,
            },
        )?;

        self.containers.pop();
        self.media_queries = old_media_queries;

        self.set_group_end();

        Ok(())
    }

    fn visit_unknown_at_rule(&mut self, unknown_at_rule: AstUnknownAtRule) -> GroutResult<()> {
        let AstUnknownAtRule {
            name,
            params,
            body,
            span,
        } = unknown_at_rule;

        // the serializer decides whether a charset is needed
        if name.eq_ignore_ascii_case("charset") {
            return Ok(());
        }

        let children = match body {
            Some(children) => children,
            None => {
                let stmt = CssStmt::UnknownAtRule(
                    UnknownAtRule {
                        name,
                        params,
                        body: Vec::new(),
                        has_body: false,
                    },
                    false,
                );

                self.css_tree.add_stmt(stmt, self.parent);

                return Ok(());
            }
        };

        let was_in_keyframes = self.flags.in_keyframes();
        let was_in_unknown_at_rule = self.flags.in_unknown_at_rule();

        if unvendor(&name).eq_ignore_ascii_case("keyframes") {
            self.flags.set(ContextFlags::IN_KEYFRAMES, true);
        } else {
            self.flags.set(ContextFlags::IN_UNKNOWN_AT_RULE, true);
        }

        let container = self.extender.add_container();
        self.containers.push(container);

        let stmt = CssStmt::UnknownAtRule(
            UnknownAtRule {
                name,
                params,
                body: Vec::new(),
                has_body: true,
            },
            false,
        );

        self.with_parent(
            stmt,
            |visitor| {
                if !visitor.style_rule_exists() || visitor.flags.in_keyframes() {
                    visitor.visit_children(children)
                } else {
                    visitor.with_style_rule_copy(span, |visitor| visitor.visit_children(children))
                }
            },
            CssStmt::is_style_rule,
        )?;

        self.containers.pop();

        self.flags.set(ContextFlags::IN_KEYFRAMES, was_in_keyframes);
        self.flags
            .set(ContextFlags::IN_UNKNOWN_AT_RULE, was_in_unknown_at_rule);

        self.set_group_end();

        Ok(())
    }

    /// Copy the current style rule into the at-rule being visited so that
    /// declarations immediately inside it have somewhere to go.
    ///
    /// For example, "a {@media screen {b: c}}" should produce
    /// "@media screen {a {b: c}}". The copy is a rule of its own as far as
    /// extends are concerned, since it lives in a different container.
    fn with_style_rule_copy<F: FnOnce(&mut Self) -> GroutResult<()>>(
        &mut self,
        span: Span,
        callback: F,
    ) -> GroutResult<()> {
        let selectors = match &self.style_rule_ignoring_at_root {
            Some(context) => context.selectors.clone(),
            None => return callback(self),
        };

        let (rule, selector) =
            self.extender
                .add_rule(selectors.clone(), self.containers.clone(), span);

        let ruleset = CssStmt::RuleSet {
            selector,
            body: Vec::new(),
            is_group_end: false,
        };

        let old_style_rule_ignoring_at_root = self
            .style_rule_ignoring_at_root
            .replace(StyleRuleContext { selectors, rule });

        let result = self.with_parent(ruleset, callback, |_| false);

        self.style_rule_ignoring_at_root = old_style_rule_ignoring_at_root;

        result
    }

    fn visit_loud_comment(&mut self, comment: AstLoudComment) {
        let comment = CssStmt::Comment(comment.text, comment.span);
        self.css_tree.add_stmt(comment, self.parent);
    }

    fn add_child<F: Fn(&CssStmt) -> bool>(
        &mut self,
        node: CssStmt,
        through: Option<F>,
    ) -> CssTreeIdx {
        let mut parent = match self.parent {
            Some(parent) if parent != CssTree::ROOT => parent,
            _ => return self.css_tree.add_stmt(node, self.parent),
        };

        if let Some(through) = through {
            while parent != CssTree::ROOT
                && self.css_tree.get(parent).map_or(false, &through)
            {
                parent = match self.css_tree.parent_of(parent) {
                    Some(grandparent) => grandparent,
                    None => break,
                };
            }

            // If the parent has a (visible) following sibling, we shouldn't add to
            // the parent. Instead, we should create a copy and add it after the
            // interstitial sibling.
            if self.css_tree.has_following_sibling(parent) {
                let grandparent = self.css_tree.parent_of(parent);
                let parent_node = self
                    .css_tree
                    .get(parent)
                    .map(CssStmt::copy_without_children);

                if let (Some(grandparent), Some(parent_node)) = (grandparent, parent_node) {
                    parent = self.css_tree.add_child(parent_node, grandparent);
                }
            }
        }

        self.css_tree.add_child(node, parent)
    }

    fn with_parent<F: FnOnce(&mut Self) -> GroutResult<()>, FT: Fn(&CssStmt) -> bool>(
        &mut self,
        parent: CssStmt,
        callback: F,
        through: FT,
    ) -> GroutResult<()> {
        let parent_idx = self.add_child(parent, Some(through));
        let old_parent = self.parent;
        self.parent = Some(parent_idx);
        let result = callback(self);
        self.parent = old_parent;
        result
    }

    pub fn visit_ruleset(&mut self, ruleset: AstRuleSet) -> GroutResult<()> {
        let AstRuleSet {
            selector: selector_text,
            body: ruleset_body,
            selector_span,
            span,
        } = ruleset;

        if self.flags.in_keyframes() {
            let keyframes_ruleset = CssStmt::KeyframesRuleSet(KeyframesRuleSet {
                selector: collapse_whitespace(&selector_text),
                body: Vec::new(),
            });

            return self.with_parent(
                keyframes_ruleset,
                |visitor| visitor.visit_children(ruleset_body),
                CssStmt::is_style_rule,
            );
        }

        let parsed_selector = SelectorParser::from_text(
            &selector_text,
            true,
            self.syntax == InputSyntax::Scss,
            selector_span,
        )
        .parse()?;

        let parent_selectors = self
            .style_rule_ignoring_at_root
            .as_ref()
            .map_or(&[][..], |context| context.selectors.as_slice());

        let resolved = combine(
            parent_selectors,
            &parsed_selector,
            !self.flags.at_root_excluding_style_rule(),
        );

        let (rule_id, selector) =
            self.extender
                .add_rule(resolved.clone(), self.containers.clone(), span);

        // children nest under the selectors as they will be printed
        let selectors = match self.syntax {
            InputSyntax::Less => strip_extends(&resolved, selector_span),
            InputSyntax::Scss => resolved,
        };

        let rule = CssStmt::RuleSet {
            selector,
            body: Vec::new(),
            is_group_end: false,
        };

        let old_at_root_excluding_style_rule = self.flags.at_root_excluding_style_rule();

        self.flags
            .set(ContextFlags::AT_ROOT_EXCLUDING_STYLE_RULE, false);

        let old_style_rule_ignoring_at_root =
            self.style_rule_ignoring_at_root.replace(StyleRuleContext {
                selectors,
                rule: rule_id,
            });

        self.with_parent(
            rule,
            |visitor| visitor.visit_children(ruleset_body),
            CssStmt::is_style_rule,
        )?;

        self.style_rule_ignoring_at_root = old_style_rule_ignoring_at_root;
        self.flags.set(
            ContextFlags::AT_ROOT_EXCLUDING_STYLE_RULE,
            old_at_root_excluding_style_rule,
        );

        self.set_group_end();

        Ok(())
    }

    fn set_group_end(&mut self) -> Option<()> {
        if !self.style_rule_exists() {
            let child = self
                .css_tree
                .last_child(self.parent.unwrap_or(CssTree::ROOT))?;
            self.css_tree.get_mut(child)?.set_group_end();
        }

        Some(())
    }

    fn style_rule_exists(&self) -> bool {
        !self.flags.at_root_excluding_style_rule() && self.style_rule_ignoring_at_root.is_some()
    }

    pub fn visit_style(&mut self, style: AstStyle) -> GroutResult<()> {
        if !self.style_rule_exists()
            && !self.flags.in_unknown_at_rule()
            && !self.flags.in_keyframes()
        {
            return match self.syntax {
                InputSyntax::Scss => Err((
                    "Declarations may only be used within style rules.",
                    style.span,
                )
                    .into()),
                InputSyntax::Less => Ok(()),
            };
        }

        self.css_tree.add_stmt(
            CssStmt::Style(Style {
                property: InternedString::get_or_intern(&style.name),
                value: style.value,
            }),
            self.parent,
        );

        Ok(())
    }
}
