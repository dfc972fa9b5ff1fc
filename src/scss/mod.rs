//! SCSS Language Server
//!
//! Provides IDE features for SCSS stylesheets using:
//! - tree-sitter-scss for parsing and structural queries
//! - tower-lsp for the Language Server Protocol implementation

pub mod completion;
pub mod diagnostics;
pub mod document;
pub mod extract;
pub mod hover;
pub mod navigation;
pub mod parser;
pub mod position;
pub mod queries;
pub mod server;
pub mod symbols;
pub mod workspace;

#[cfg(test)]
mod completion_tests;
#[cfg(test)]
mod navigation_tests;
