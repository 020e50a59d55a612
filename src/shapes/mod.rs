pub mod polygon;
pub mod segment;
pub mod simplify;
pub mod triangulate;

pub use polygon::{centroid, signed_area, Polygon, MIN_CONTOUR_AREA};
pub use segment::{intersect_segments, point_in_contour, LineSegment, SegmentIntersection};
pub use simplify::douglas_peucker;
pub use triangulate::{triangulate, Triangle};
