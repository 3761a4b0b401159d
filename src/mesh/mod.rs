mod grid;
mod header;

pub use self::grid::MeshGrid;
pub use self::header::Header;
