use async_trait::async_trait;
use tracing::warn;

use crate::{profile::PlayStyle, services::gemini::GeminiClient};

/// Rewrites a golfer's bio. On any failure the original bio comes back unchanged.
#[async_trait]
pub trait BioEnhancer: Send + Sync {
    async fn enhance(&self, bio: &str, play_style: PlayStyle) -> String;
}

#[derive(Debug, Clone)]
pub struct GeminiBioEnhancer {
    client: GeminiClient,
}

impl GeminiBioEnhancer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BioEnhancer for GeminiBioEnhancer {
    async fn enhance(&self, bio: &str, play_style: PlayStyle) -> String {
        match self.client.generate(&prompt(bio, play_style), None).await {
            Ok(text) => keep_if_blank(bio, &text),
            Err(e) => {
                warn!("Error enhancing bio: {e}");
                bio.to_string()
            }
        }
    }
}

fn prompt(bio: &str, play_style: PlayStyle) -> String {
    format!(
        "Rewrite the following golfer bio to be more engaging, witty, and social. \
         The player describes themselves as \"{play_style}\".\n\
         Current Bio: \"{bio}\"\n\
         Keep it under 30 words."
    )
}

fn keep_if_blank(original: &str, generated: &str) -> String {
    let generated = generated.trim();
    if generated.is_empty() {
        original.to_string()
    } else {
        generated.to_string()
    }
}
