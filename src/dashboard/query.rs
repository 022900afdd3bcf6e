// Shared query context: widget-name -> predicate string, plus
// variable-name -> literal binding for predicate evaluation. Each widget
// only writes keys derived from its own name/column; the context itself
// enforces nothing beyond plain map semantics.

use std::collections::BTreeMap;

use crate::types::Scalar;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryContext {
    predicates: BTreeMap<String, String>,
    locals: BTreeMap<String, Scalar>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_predicate(&mut self, widget: &str, predicate: String) {
        self.predicates.insert(widget.to_string(), predicate);
    }

    /// No-op when the entry is already absent.
    pub fn remove_predicate(&mut self, widget: &str) {
        self.predicates.remove(widget);
    }

    pub fn set_local(&mut self, name: &str, value: Scalar) {
        self.locals.insert(name.to_string(), value);
    }

    pub fn remove_local(&mut self, name: &str) {
        self.locals.remove(name);
    }

    pub fn predicate(&self, widget: &str) -> Option<&str> {
        self.predicates.get(widget).map(|s| s.as_str())
    }

    pub fn local(&self, name: &str) -> Option<&Scalar> {
        self.locals.get(name)
    }

    pub fn predicates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.predicates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn locals(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.locals.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// All active predicates joined for display or an external engine.
    pub fn combined(&self) -> String {
        self.predicates
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_is_idempotent() {
        let mut ctx = QueryContext::new();
        ctx.set_predicate("w", "a == 1".into());
        ctx.remove_predicate("w");
        ctx.remove_predicate("w");
        assert!(ctx.is_empty());
        assert_eq!(ctx.predicate("w"), None);
    }

    #[test]
    fn combined_joins_with_and() {
        let mut ctx = QueryContext::new();
        ctx.set_predicate("a_widget", "a == @a_value".into());
        ctx.set_predicate("b_widget", "@b_min<=b<=@b_max".into());
        ctx.set_local("a_value", Scalar::Int(1));
        assert_eq!(ctx.combined(), "a == @a_value and @b_min<=b<=@b_max");
        assert_eq!(ctx.local("a_value"), Some(&Scalar::Int(1)));
    }
}
