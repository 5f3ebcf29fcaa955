use crate::ast::CssStmt;

#[derive(Debug, Clone)]
pub(crate) struct UnknownAtRule {
    pub name: String,
    pub params: String,
    pub body: Vec<CssStmt>,

    /// Whether or not this @-rule was declared with curly
    /// braces. A body may not necessarily have contents
    pub has_body: bool,
}
