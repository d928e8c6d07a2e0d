mod api;
mod enums;
mod libgl;
mod types;

pub use api::*;
pub use enums::*;
pub use libgl::LoadError;
pub use types::*;
