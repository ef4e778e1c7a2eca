#[path = "builder/backend.rs"]
mod backend;

#[path = "builder/factory.rs"]
mod factory;

pub use backend::LLMBackend;
pub use factory::{ClientFactory, ClientSet};
