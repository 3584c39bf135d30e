// src/render/mod.rs
//! Rendering seam.
//!
//! The chart is built client-side, so the extractor needs a real browser to
//! get at the final DOM. A `Renderer` opens a `RenderSession`; the session owns
//! whatever external resource backs it and gives it back on `Drop`, so every
//! exit path of an extraction releases it.

#[cfg(feature = "chrome")]
mod chrome;
mod static_page;

#[cfg(feature = "chrome")]
pub use chrome::{ChromeRenderer, ChromeSession};
pub use static_page::{StaticRenderer, StaticSession};

use crate::config::ExtractOptions;
use crate::error::ExtractError;

pub trait RenderSession {
    /// Navigate to `url`. Failure here is fatal for the run.
    fn load(&mut self, url: &str) -> Result<(), ExtractError>;

    /// Current serialized DOM of the loaded page.
    fn content(&mut self) -> Result<String, ExtractError>;
}

pub trait Renderer {
    type Session: RenderSession;

    /// Start a session with the viewport and client identity from `opts`.
    fn launch(&self, opts: &ExtractOptions) -> Result<Self::Session, ExtractError>;
}
