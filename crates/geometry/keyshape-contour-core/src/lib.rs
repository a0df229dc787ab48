//! Keyshape contour core.
//!
//! Generates closed vertex outlines for parametric shapes (circles, polygons,
//! stars, flowers, rings). Ring-family shapes carry one hole contour wound
//! against the outer contour.

pub mod contour;
pub mod error;
pub mod shape;

pub use contour::{Bounds, Contour, ContourSet};
pub use error::{ContourError, Result};
pub use shape::{generate, Shape, ShapeParams, DEFAULT_NUM_VERTICES, MIN_VERTICES};
