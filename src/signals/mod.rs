//! Signal classification and recommendation selection.

pub mod decision;
pub mod signal_generator;

pub use decision::*;
pub use signal_generator::*;
