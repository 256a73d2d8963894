//! Collaborator traits
//!
//! Interfaces to components outside the protocol core. Hardware
//! capabilities live in `tandem-hal`; these are the software ones.

pub mod raster;

pub use raster::Rasterizer;
