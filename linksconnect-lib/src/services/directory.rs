use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use crate::{
    Result,
    profile::{GolferProfile, Handicap, PlayStyle, ProfileId, avatar_url},
    services::gemini::{GeminiClient, GenerationConfig},
};

/// Source of candidate golfers near a location.
///
/// Never fails: implementations degrade to placeholder golfers so the feed always
/// has something to show.
#[async_trait]
pub trait GolferDirectory: Send + Sync {
    async fn fetch(&self, location: &str, count: usize) -> Vec<GolferProfile>;
}

/// Directory backed by Gemini-generated fictional golfers.
#[derive(Debug, Clone)]
pub struct GeminiDirectory {
    client: GeminiClient,
}

impl GeminiDirectory {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    async fn generate(&self, location: &str, count: usize) -> Result<Vec<GolferProfile>> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(profile_schema()),
            temperature: Some(0.7),
        };

        let text = self
            .client
            .generate(&prompt(location, count), Some(&config))
            .await?;

        parse_golfers(&text)
    }
}

#[async_trait]
impl GolferDirectory for GeminiDirectory {
    async fn fetch(&self, location: &str, count: usize) -> Vec<GolferProfile> {
        match self.generate(location, count).await {
            Ok(golfers) => golfers,
            Err(e) => {
                error!("Error generating local golfers: {e}");
                fallback_golfers(location)
            }
        }
    }
}

fn prompt(location: &str, count: usize) -> String {
    format!(
        "Generate {count} fictional golfer profiles located in or near {location}. \
         Make them diverse in terms of age (20-60), handicap (-2 to 30), and gender. \
         The bio should be short (1-2 sentences) and golf-focused. \
         Ensure the location is realistically close to {location}."
    )
}

fn profile_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "age": { "type": "INTEGER" },
                "handicap": { "type": "NUMBER" },
                "location": { "type": "STRING" },
                "homeCourse": { "type": "STRING" },
                "bio": { "type": "STRING" },
                "playStyle": {
                    "type": "STRING",
                    "enum": ["Casual", "Competitive", "Weekend Warrior", "Pro"]
                }
            },
            "required": [
                "id", "name", "age", "handicap", "location", "homeCourse", "bio", "playStyle"
            ]
        }
    })
}

/// Parse generated golfers, giving each an avatar and making ids unique.
fn parse_golfers(text: &str) -> Result<Vec<GolferProfile>> {
    let mut golfers: Vec<GolferProfile> = serde_json::from_str(text)?;

    let mut seen = HashSet::new();
    for golfer in &mut golfers {
        if !seen.insert(golfer.id.clone()) {
            let id = ProfileId::generate();
            warn!("Duplicate golfer id {}, re-keyed as {id}", golfer.id);
            golfer.id = id.clone();
            seen.insert(id);
        }
        golfer.avatar_url = Some(avatar_url(&golfer.id));
    }

    Ok(golfers)
}

/// Shown when the directory can't be reached.
pub fn fallback_golfers(location: &str) -> Vec<GolferProfile> {
    vec![GolferProfile {
        id: "fallback-1".into(),
        name: "Tiger Woods (Clone)".into(),
        age: 45,
        handicap: Handicap::SCRATCH,
        location: location.to_string(),
        home_course: "Augusta National".into(),
        bio: "Just looking for a quick 9 holes after work.".into(),
        avatar_url: Some("https://picsum.photos/200".into()),
        ghin_number: None,
        play_style: PlayStyle::Pro,
    }]
}
