//! Reading and rewriting glTF-Binary (GLB) containers, plus a provenance
//! marker kept in the glTF `asset` object.

pub mod asset;
pub mod glb;
pub mod marker;

#[cfg(test)]
mod testdata;

pub use glb::{
	FormatError,
	Glb
};

#[cfg(feature = "import")]
pub use glb::parse;

pub use marker::{
	DEFAULT_MARKER,
	MarkerConfig
};

#[cfg(feature = "import")]
pub use marker::{
	has_marker,
	read_marker
};

#[cfg(all(feature = "import", feature = "export"))]
pub use marker::inject;
