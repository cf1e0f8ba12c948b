// generation.rs

use crate::error::GenerationError;
use crate::prompt;
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use std::collections::HashMap;

/// External text-generation call, one per agent.
///
/// Takes an instruction template and the variables to substitute into it and
/// returns the generated text. The trait is the seam between the
/// coordination core and the inference backend; tests substitute stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        template: &str,
        vars: &HashMap<String, String>,
    ) -> Result<String, GenerationError>;
}

/// `TextGenerator` backed by a local Ollama daemon.
///
/// Each instance carries its own sampling temperature so every role can
/// trade determinism against creativity independently.
pub struct OllamaGenerator {
    client: Ollama,
    model: String,
    temperature: f32,
}

impl OllamaGenerator {
    pub fn new(model: String, temperature: f32) -> Self {
        Self {
            client: Ollama::default(),
            model,
            temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(
        &self,
        template: &str,
        vars: &HashMap<String, String>,
    ) -> Result<String, GenerationError> {
        let rendered = prompt::render(template, vars);
        let request = GenerationRequest::new(self.model.clone(), rendered)
            .options(GenerationOptions::default().temperature(self.temperature));

        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| GenerationError::Service(e.to_string()))?;

        if response.response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(response.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_fails_without_daemon() {
        // No Ollama daemon is running in the test environment; the call must
        // surface a service error instead of panicking.
        let generator = OllamaGenerator::new("llama3.2:latest".to_string(), 0.3);
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), "anything".to_string());

        let result = generator.generate(prompt::RESEARCHER, &vars).await;
        assert!(matches!(result, Err(GenerationError::Service(_))));
    }
}
