//! Hugging Face Inference API provider.
//!
//! Chat completions go through the OpenAI-compatible router endpoint;
//! embeddings through the feature-extraction pipeline endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::ApiError;

#[derive(Clone)]
pub struct HfEndpointProvider {
    router_base: String,
    inference_base: String,
    api_token: String,
    client: Client,
}

impl HfEndpointProvider {
    pub fn new(router_base: &str, inference_base: &str, api_token: &str) -> Self {
        Self {
            router_base: router_base.trim_end_matches('/').to_string(),
            inference_base: inference_base.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            client: Client::new(),
        }
    }

    fn extract_chat_content(payload: &Value) -> Option<String> {
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl LlmProvider for HfEndpointProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/models", self.router_base);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, ApiError> {
        let url = format!("{}/chat/completions", self.router_base);

        let mut body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.temperature {
                obj.insert("temperature".to_string(), json!(t));
            }
            if let Some(t) = request.top_p {
                obj.insert("top_p".to_string(), json!(t));
            }
            if let Some(t) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(t));
            }
        }

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "chat completion failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::internal)?;
        Self::extract_chat_content(&payload)
            .ok_or_else(|| ApiError::Internal("chat completion returned no content".to_string()))
    }

    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        let url = format!(
            "{}/models/{}/pipeline/feature-extraction",
            self.inference_base, model_id
        );

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "inputs": inputs }))
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "feature extraction failed ({}): {}",
                status, text
            )));
        }

        let vectors: Vec<Vec<f32>> = res.json().await.map_err(ApiError::internal)?;

        if vectors.len() != inputs.len() {
            return Err(ApiError::Internal(format!(
                "embedding count mismatch: {} inputs, {} vectors",
                inputs.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn chat_content_is_extracted_from_openai_shape() {
        let payload = json!({
            "choices": [{"message": {"role": "assistant", "content": "Hola"}}]
        });
        assert_eq!(
            HfEndpointProvider::extract_chat_content(&payload).as_deref(),
            Some("Hola")
        );
    }

    #[test]
    fn missing_content_yields_none() {
        let payload = json!({"choices": []});
        assert!(HfEndpointProvider::extract_chat_content(&payload).is_none());
    }

    #[test]
    fn base_urls_are_normalized() {
        let provider =
            HfEndpointProvider::new("http://localhost:9999/v1/", "http://localhost:9999/", "tok");
        assert_eq!(provider.router_base, "http://localhost:9999/v1");
        assert_eq!(provider.inference_base, "http://localhost:9999");
    }

    #[test]
    fn chat_messages_serialize_with_roles() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("instrucciones"),
            ChatMessage::user("Hola"),
        ]);
        let serialized = serde_json::to_value(&request.messages).unwrap();
        assert_eq!(serialized[0]["role"], "system");
        assert_eq!(serialized[1]["content"], "Hola");
    }
}
