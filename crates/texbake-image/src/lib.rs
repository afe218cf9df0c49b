mod data;
mod encode;
mod export;
mod pack;

pub use data::*;
pub use encode::*;
pub use export::*;
pub use pack::*;

pub use image::ImageError;
