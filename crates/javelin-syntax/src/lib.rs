//! Lossless, immutable syntax tree for Java sources.
//!
//! The tree is arena-allocated and built bottom-up; parent links are filled
//! in by a single pass once every node exists. Handles borrow the tree and
//! never allocate.

/// Typed views over syntax nodes.
pub mod ast;
mod builder;
mod cursor;
mod declared;
mod edit;
mod language_level;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod token;
mod tree;

/// Two-phase builder for `SyntaxTree`.
pub use builder::TreeBuilder;
/// Pre-order traversal with enter/leave events.
pub use cursor::{Preorder, WalkEvent};
/// Normalized declared types and where their brackets were written.
pub use declared::{DeclaredType, Dimension, DimensionPosition, TypeShape};
/// Text edits for quick fixes.
pub use edit::{EditError, TextEdit, apply_edits};
pub use language_level::{Feature, LanguageLevel};
/// Borrowed handles into a finished tree.
pub use syntax::{SyntaxElement, SyntaxNode, SyntaxToken};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::{STATEMENTS, SyntaxSet, TYPE_DECLARATIONS};
pub use token::{Position, Token, TokenId, Trivia, TriviaKind};
pub use tree::{Element, LineColRange, NodeData, NodeId, SyntaxTree, TreeError};
/// Re-exported so downstream crates agree on offsets.
pub use text_size::{TextRange, TextSize};
