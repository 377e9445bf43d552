//! From front-end output to the tree rules run on.
//!
//! [`parse_and_convert`] runs a [`javelin_frontend::FrontEnd`] over one file,
//! rebuilds its tree on top of the file's own tokens, registers declarations
//! and usages with the semantic model and attaches front-end warnings to
//! nodes. The result is a read-only [`FileContext`].

mod context;
mod convert;
mod error;
mod navigator;
mod policy;
mod quickfix;
mod warnings;

pub use crate::context::FileContext;
pub use crate::convert::{convert_file, parse_and_convert};
pub use crate::error::{ConvertError, Mismatch};
pub use crate::navigator::Navigator;
pub use crate::policy::{ExceptionTable, SyntaxPolicy};
pub use crate::quickfix::move_dimensions_to_type;
pub use crate::warnings::{Warning, WarningCategory, attach_warnings};
