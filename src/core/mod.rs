pub mod geometry;
pub mod line_path;

pub use geometry::{
    CellsCount, HeightBounds, ResolvedGeometry, SizeRequest, resolve_geometry, round_up_to_ten,
};
pub use line_path::{LineMode, LinePath, PathCommand, build_line_path, validate_series};
