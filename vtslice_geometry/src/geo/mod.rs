#![allow(clippy::module_inception)]

mod axis;
mod bbox;
mod feature;
mod geometry;
mod properties;
mod ring;
mod value;
mod vertex;

pub use axis::*;
pub use bbox::*;
pub use feature::*;
pub use geometry::*;
pub use properties::*;
pub use ring::*;
pub use value::*;
pub use vertex::*;
