pub mod config;
pub mod cover;
pub mod publication;

pub use publication::{Publication, PublicationData};
