#[cfg(feature = "ahash")]
pub use ahash;
#[cfg(feature = "hashbrown")]
pub use hashbrown;
#[cfg(feature = "smallvec")]
pub use smallvec;
#[cfg(feature = "thiserror")]
pub use thiserror;

#[cfg(feature = "ahash")]
pub type RandomState = ahash::RandomState;

#[cfg(feature = "hashbrown")]
pub type HashMap<K, V, S = RandomState> = hashbrown::HashMap<K, V, S>;

#[cfg(feature = "math")]
pub mod math {
    pub use glam::{swizzles::*, *};
}
