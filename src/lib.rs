//! Wave-fan geometry for one-dimensional Riemann problems.
//!
//! Turns a sorted list of characteristic speeds and a simulation time into the
//! colored, labeled polygons of the x-t fan and the x-U solution profile.
//! Nothing here touches a window or the GPU; see the binary for that.

pub mod config;
pub mod editor;
pub mod overlay;
pub mod simulation;
