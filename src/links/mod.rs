// Link persistence and response shaping

pub mod error;
pub mod models;
pub mod repository;

pub use error::LinkError;
pub use models::{Link, LinkResponse, NewLink};
pub use repository::{LinkRepository, LinkStore};
