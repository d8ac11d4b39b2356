//! Numeric helpers: projection into unit-square mercator space, ring areas and the
//! vertex importance simplifier.

mod area;
mod projection;
mod simplify;

pub use area::*;
pub use projection::*;
pub use simplify::*;
