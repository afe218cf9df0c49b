mod backend;
mod channel;
mod environment;
mod error;
mod export;
mod progress;
mod request;
mod runner;

pub use backend::*;
pub use channel::*;
pub use environment::*;
pub use error::*;
pub use export::*;
pub use progress::*;
pub use request::*;
pub use runner::*;
