//! Symbol and usage facade over front-end bindings.
//!
//! The tree converter registers every declaration and name usage with a
//! [`SemanticBuilder`] as it creates nodes; the frozen [`SemanticModel`]
//! answers which node declares a binding, where it is used, and what the
//! front-end knows about it through [`Symbol`].

mod backend;
mod builder;
mod labels;
mod model;
#[cfg(test)]
mod tests;

pub use crate::backend::SymbolBackend;
pub use crate::builder::SemanticBuilder;
pub use crate::labels::{LabelFrame, LabelId, LabelScopes, LabelSymbol};
pub use crate::model::{SemanticModel, Symbol};
