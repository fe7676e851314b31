use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod ollama;

pub use ollama::ChatClient;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Talk {
    pub role: Role,
    pub content: String,
    // Base64-encoded page or region images
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Talk {
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content, images: Vec::new() }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Boundary to the vision-capable language model: prompt plus images in, raw text out.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn complete(&self, prompt: &str, images: &[String]) -> anyhow::Result<String>;
}
