//! Platform-agnostic animation logic for the starfolio site.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for use on both native and web targets. The frontends consume
//! them to drive the pressure headline, the starfield layers and the
//! scroll-synchronized camera.

pub mod camera;
pub mod constants;
pub mod geom;
pub mod pressure;
pub mod reveal;
pub mod sections;
pub mod starfield;
pub mod typing;

pub static STARFIELD_WGSL: &str = include_str!("../shaders/starfield.wgsl");

pub use camera::*;
pub use constants::*;
pub use geom::*;
pub use pressure::*;
pub use reveal::*;
pub use sections::*;
pub use starfield::*;
pub use typing::*;
