// src/render/static_page.rs
// Serves an already-rendered document (saved page, test fixture).

use std::{fs, io, path::Path};

use super::{RenderSession, Renderer};
use crate::config::ExtractOptions;
use crate::error::ExtractError;

#[derive(Clone, Debug)]
pub struct StaticRenderer {
    html: String,
}

impl StaticRenderer {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }
}

impl Renderer for StaticRenderer {
    type Session = StaticSession;

    fn launch(&self, _opts: &ExtractOptions) -> Result<StaticSession, ExtractError> {
        Ok(StaticSession { html: self.html.clone(), loaded: false })
    }
}

pub struct StaticSession {
    html: String,
    loaded: bool,
}

impl RenderSession for StaticSession {
    fn load(&mut self, url: &str) -> Result<(), ExtractError> {
        logd!("static page standing in for {url}");
        self.loaded = true;
        Ok(())
    }

    fn content(&mut self) -> Result<String, ExtractError> {
        if !self.loaded {
            return Err(ExtractError::Render(s!("no page loaded")));
        }
        Ok(self.html.clone())
    }
}
