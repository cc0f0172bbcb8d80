//! Structural elements module

mod element;
mod node;
mod section;
mod support;

pub use element::Element;
pub use node::{DofAllocator, Node};
pub use section::Section;
pub use support::{Constraint, Constraints};
