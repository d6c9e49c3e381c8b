//! Visualization and plotting

pub mod figure;
pub mod panels;

pub use figure::FigurePlotter;
pub use panels::{build_panels, Marker, Panel, Series};
