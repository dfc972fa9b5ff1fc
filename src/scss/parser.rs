//! SCSS Parser using tree-sitter-scss
//!
//! Thin wrapper around the tree-sitter parser configured with the scss
//! grammar. The structural pattern queries that feed symbol extraction are
//! compiled alongside the parser, see [`crate::scss::queries`].

use tree_sitter::{Parser, Tree};

use crate::scss::queries::ScssQueries;

/// SCSS parser wrapper around tree-sitter
pub struct ScssParser {
    parser: Parser,
    queries: ScssQueries,
}

impl ScssParser {
    /// Create a new SCSS parser with its compiled queries
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mut parser = Parser::new();
        let language = tree_sitter_scss::language();
        parser.set_language(&language)?;
        let queries = ScssQueries::new(language)?;

        Ok(Self { parser, queries })
    }

    /// Parse SCSS content and return the syntax tree
    ///
    /// Returns `None` when the parser gives up (for example on a timeout or
    /// cancellation); callers keep whatever tree they had before.
    pub fn parse(&mut self, content: &str, old_tree: Option<&Tree>) -> Option<Tree> {
        self.parser.parse(content, old_tree)
    }

    /// The compiled structural queries for this grammar
    pub fn queries(&self) -> &ScssQueries {
        &self.queries
    }
}

impl Default for ScssParser {
    fn default() -> Self {
        Self::new().expect("Failed to create SCSS parser")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        let parser = ScssParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_basic_parsing() {
        let mut parser = ScssParser::new().unwrap();
        let content = ".my-class { color: red; }";
        let tree = parser.parse(content, None);
        assert!(tree.is_some());

        let tree = tree.unwrap();
        let root = tree.root_node();
        assert!(!root.has_error());
        assert_eq!(root.kind(), "stylesheet");

        // Check the rule node
        let rule = root.child(0).unwrap();
        assert_eq!(rule.kind(), "rule_set");

        // First child of a rule set is its selector list
        let selectors = rule.child(0).unwrap();
        assert_eq!(selectors.kind(), "selectors");
        assert_eq!(
            selectors.utf8_text(content.as_bytes()).unwrap(),
            ".my-class"
        );
    }

    #[test]
    fn test_scss_specific_parsing() {
        let mut parser = ScssParser::new().unwrap();
        let content = "@mixin pad($size) { padding: $size; }\n$gap: 4px;\n";
        let tree = parser.parse(content, None).unwrap();
        let root = tree.root_node();
        assert!(!root.has_error());

        let mixin = root.child(0).unwrap();
        assert_eq!(mixin.kind(), "mixin_statement");

        let declaration = root.child(1).unwrap();
        assert_eq!(declaration.kind(), "declaration");
        let name = declaration.named_child(0).unwrap();
        assert_eq!(name.kind(), "variable_name");
        assert_eq!(name.utf8_text(content.as_bytes()).unwrap(), "$gap");
    }

    #[test]
    fn test_reparse_with_previous_tree() {
        let mut parser = ScssParser::new().unwrap();
        let first = parser.parse(".a { color: red; }", None).unwrap();
        let second = parser.parse(".a { color: blue; }", Some(&first));
        assert!(second.is_some());
    }
}
