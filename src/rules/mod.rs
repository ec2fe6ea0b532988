//! Rule compilation and link resolution for mediabro.
//!
//! This module handles:
//! - Compiling rule definitions into an immutable [`RuleTable`]
//! - Parsing `$n` replacement templates
//! - First-match-wins resolution of an input link

pub mod resolver;
pub mod table;
pub mod template;

pub use resolver::{Resolution, resolve};
pub use table::{ReplacementSpec, Rule, RuleTable};
pub use template::{Template, TemplateError};
