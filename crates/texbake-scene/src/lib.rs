mod id;
mod object;
mod scene;
mod settings;

pub use id::*;
pub use object::*;
pub use scene::*;
pub use settings::*;
