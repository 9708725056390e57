//! Boundary-based evaluation: boundary maps, disk dilation and the boundary
//! F-measure.

pub mod bmap;
pub mod eval;
pub mod morphology;

pub use bmap::seg2bmap;
pub use eval::{db_eval_boundary, db_eval_boundary_detailed, tolerance_pixels, DEFAULT_BOUND_TH};
pub use morphology::{binary_dilation, StructuringElement};
