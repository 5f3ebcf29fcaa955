pub(crate) use visitor::Visitor;

mod css_tree;
mod visitor;
