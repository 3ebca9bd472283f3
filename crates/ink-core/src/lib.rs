pub mod detect;
pub mod env;
pub mod id;
pub mod model;
pub mod overlay;
pub mod surface;

pub use detect::detect_bounding_box;
pub use env::VariableEnv;
pub use id::OverlayId;
pub use model::*;
pub use overlay::{Overlay, OverlayManager};
pub use surface::Surface;
