#![allow(async_fn_in_trait)]
//! Headless publications admin console.
//!
//! [`store::PublicationStore`] keeps the session's collection of publications and
//! is the only component which mutates it. [`form::PublicationForm`] and
//! [`list::PublicationList`] hold presentation state and call into the store,
//! [`session::Console`] glues them together with navigation.

pub mod backend;
pub mod error;
pub mod form;
pub mod list;
pub mod route;
pub mod session;
pub mod store;
pub mod upload;

pub use error::{ConsoleError, Result};
pub use route::Route;
pub use session::Console;
pub use store::PublicationStore;
