//! Layout and text helpers.

pub mod markup;
pub mod placement;
