//! Keyshape path core.
//!
//! Vector path model shared by the contour generator and the animation crate:
//! commands, the path mini-language, arc flattening, and arc-length
//! resampling of cubic outlines.

pub mod arc;
pub mod command;
pub mod error;
pub mod parse;
pub mod path;
pub mod point;
pub mod segment;

pub use arc::{flatten_arc, flatten_arc_segments, ArcSpec};
pub use command::PathCommand;
pub use error::{PathError, Result};
pub use path::Path;
pub use point::Point;
pub use segment::{centroid, resample_polyline, signed_area, CubicSegment, Subpath};
