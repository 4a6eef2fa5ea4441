//! Content-shape detectors that gate admission independently of subject
//! classification.
//!
//! * [`DiagramDetector`] / [`looks_like_diagram`]: answer must be drawn.
//! * [`MathDetector`] / [`looks_like_heavy_math`]: answer needs real math.
//!
//! Both are total over any input, including the empty string.

pub mod diagram;
pub mod math;

pub use diagram::{looks_like_diagram, DiagramDetector};
pub use math::{looks_like_heavy_math, MathDetector};
