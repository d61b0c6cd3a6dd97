//! Clients for everything outside the app: the AI-backed golfer directory and bio
//! enhancer, and the simulated GHIN handicap lookup.

use std::sync::Arc;

use crate::{
    Result,
    config::CoreConfig,
    services::{
        bio::{BioEnhancer, GeminiBioEnhancer},
        directory::{GeminiDirectory, GolferDirectory},
        gemini::GeminiClient,
        ghin::{HandicapLookup, MockGhin},
    },
};

pub mod bio;
pub mod directory;
pub mod gemini;
pub mod ghin;

/// The set of external collaborators a front end needs. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub directory: Arc<dyn GolferDirectory>,
    pub enhancer: Arc<dyn BioEnhancer>,
    pub lookup: Arc<dyn HandicapLookup>,
}

impl Services {
    pub fn from_config(cfg: &CoreConfig) -> Result<Self> {
        let client = GeminiClient::new(&cfg.gemini)?;

        Ok(Self {
            directory: Arc::new(GeminiDirectory::new(client.clone())),
            enhancer: Arc::new(GeminiBioEnhancer::new(client)),
            lookup: Arc::new(MockGhin::new(cfg.ghin.delay())),
        })
    }
}
