use codemap::Span;

use crate::{selector::MarkerKind, InputSyntax};

/// A style rule. The selector is kept as raw text and tokenized by the
/// evaluator, once the rule's position in the tree is known.
#[derive(Debug, Clone)]
pub(crate) struct AstRuleSet {
    pub selector: String,
    pub body: Vec<AstStmt>,
    pub selector_span: Span,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstStyle {
    pub name: String,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstMedia {
    pub query: String,
    pub body: Vec<AstStmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstUnknownAtRule {
    pub name: String,
    pub params: String,
    pub body: Option<Vec<AstStmt>>,
    pub span: Span,
}

/// `@extend .a, .b;` or `&:extend(.a all, .b);`
#[derive(Debug, Clone)]
pub(crate) struct AstExtendRule {
    pub value: String,
    pub kind: MarkerKind,
    pub span: Span,
}

/// `@at-root { ... }`. The `@at-root <selector> { ... }` shorthand is parsed
/// into a body holding a single style rule.
#[derive(Debug, Clone)]
pub(crate) struct AstAtRootRule {
    pub body: Vec<AstStmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstLoudComment {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstDebugRule {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstWarn {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct AstErrorRule {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) enum AstStmt {
    RuleSet(AstRuleSet),
    Style(AstStyle),
    Media(AstMedia),
    UnknownAtRule(AstUnknownAtRule),
    Extend(AstExtendRule),
    AtRootRule(AstAtRootRule),
    LoudComment(AstLoudComment),
    Debug(AstDebugRule),
    Warn(AstWarn),
    ErrorRule(AstErrorRule),
}

#[derive(Debug, Clone)]
pub(crate) struct StyleSheet {
    pub body: Vec<AstStmt>,
    pub syntax: InputSyntax,
}

impl StyleSheet {
    pub fn new(syntax: InputSyntax) -> Self {
        Self {
            body: Vec::new(),
            syntax,
        }
    }
}
