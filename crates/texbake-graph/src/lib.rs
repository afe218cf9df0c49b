mod material;
mod node;
mod patch;
mod socket;
mod tree;

pub use material::*;
pub use node::*;
pub use patch::*;
pub use socket::*;
pub use tree::*;
