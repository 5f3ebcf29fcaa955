use crate::{ast::CssStmt, utils::split_top_level};

#[derive(Debug, Clone)]
pub(crate) struct MediaRule {
    pub query: String,
    pub body: Vec<CssStmt>,
}

/// Merge the query list of a `@media` nested in another. Every outer query is
/// combined with every inner query, outer first.
pub(crate) fn merge_queries(outer: &str, inner: &str) -> String {
    let inner = split_top_level(inner, ',');

    split_top_level(outer, ',')
        .iter()
        .flat_map(|outer| inner.iter().map(move |inner| format!("{} and {}", outer, inner)))
        .collect::<Vec<String>>()
        .join(", ")
}
