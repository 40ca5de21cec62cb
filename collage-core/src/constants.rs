//! Engine-wide numeric constants.
//! Lengths are container-local pixels unless noted otherwise.

/// Container edge the size classes were authored against (px).
pub const REFERENCE_CONTAINER: f64 = 600.0;
/// Container size divided by this gives the heart's unit length.
pub const SHAPE_DIVISOR: f64 = 3.0;
/// Container size divided by this gives the vertical center of the heart.
/// Sits above the geometric middle so the lobes and the cusp both fit.
pub const CENTER_Y_DIVISOR: f64 = 2.2;
/// Paint order for the slot pinned above its neighbours.
pub const CENTER_STACK_ORDER: i32 = 10;
/// Paint order for every other slot.
pub const BASE_STACK_ORDER: i32 = 1;
/// Number of samples used when tracing the silhouette outline.
pub const OUTLINE_SAMPLES: usize = 200;
/// Upper bound on grid scan resolution per axis.
pub const MAX_GRID_RESOLUTION: usize = 200;
/// Lowest boundary tolerance; the heart center sits at this level.
pub const MIN_TOLERANCE: f64 = -1.0;
