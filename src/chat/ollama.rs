use serde::{Deserialize, Serialize};
use reqwest::Client;
use anyhow::Context;
use async_trait::async_trait;
use super::{Role, Talk, VisionModel};
use crate::Config;

pub struct ChatClient {
    client: Client,
    model: String,
    url: String,
    options: Options,
}

impl ChatClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            model: config.vision_model.clone(),
            url: format!("{}/api/chat", config.ollama_url.trim_end_matches('/')),
            options: Options {
                seed: config.seed,
                temperature: config.temperature,
            },
        }
    }

    fn request(&self, prompt: &str, images: &[String]) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Talk::new(Role::User, prompt.to_string()).with_images(images.to_vec()),
            ],
            stream: false,
            options: self.options.clone(),
        }
    }
}

#[async_trait]
impl VisionModel for ChatClient {
    async fn complete(&self, prompt: &str, images: &[String]) -> anyhow::Result<String> {
        let request = self.request(prompt, images);
        let response = self.client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        if response.status() != 200 {
            return Err(anyhow::anyhow!(
                "Request failed:\n\tstatus: {}\n\tbody: {}",
                response.status(),
                response.text().await?
            ));
        }

        let response_body: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from model {}", self.model))?;

        Ok(response_body.message.content)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
struct Options {
    seed: i64,
    temperature: f32,
}

#[derive(Deserialize, Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Talk>,
    stream: bool,
    options: Options,
}

#[derive(Deserialize, Serialize, Debug)]
struct ChatResponse {
    message: Talk,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_config;

    #[test]
    fn test_request_body() -> anyhow::Result<()> {
        let config = read_config()?;
        let client = ChatClient::from_config(&config);
        assert!(client.url.ends_with("/api/chat"));

        let request = client.request("Extract the IP number", &["aW1n".to_string()]);
        let body = serde_json::to_value(&request)?;
        assert_eq!(body["model"], config.vision_model.as_str());
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["seed"], 42);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["images"][0], "aW1n");
        Ok(())
    }

    #[test]
    fn test_parse_response() -> anyhow::Result<()> {
        let raw = r#"{"model":"qwen3-vl:4b","message":{"role":"assistant","content":"```json\n[]\n```"},"done":true}"#;
        let response: ChatResponse = serde_json::from_str(raw)?;
        assert_eq!(response.message.role, Role::Assistant);
        assert_eq!(response.message.content, "```json\n[]\n```");
        Ok(())
    }
}
