//! Interpretation through MCP sampling: the connected client's model writes it

use async_trait::async_trait;
use rmcp::{model::CreateMessageRequestParam, service::Peer, RoleServer};
use serde_json::{json, Value};

use crate::divination::{build_user_prompt, Interpreter, SYSTEM_PROMPT};
use crate::error::{Error, Result};
use crate::models::Prediction;

/// Asks the MCP client to generate the interpretation (`sampling/createMessage`)
pub struct SamplingInterpreter {
    peer: Peer<RoleServer>,
    max_tokens: u32,
    model: Option<String>,
}

impl SamplingInterpreter {
    pub fn new(peer: Peer<RoleServer>, max_tokens: u32) -> Self {
        Self {
            peer,
            max_tokens,
            model: None,
        }
    }

    /// Hint the client towards a specific model; blank names are ignored
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }
}

/// Build the sampling request for one reading
pub fn build_request(
    prediction: &Prediction,
    question: &str,
    max_tokens: u32,
    model: Option<&str>,
) -> Result<CreateMessageRequestParam> {
    let mut payload = json!({
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": build_user_prompt(prediction, question) }
        }],
        "systemPrompt": SYSTEM_PROMPT,
        "maxTokens": max_tokens,
    });

    if let Some(model) = model {
        payload["modelPreferences"] = json!({ "hints": [{ "name": model.trim() }] });
    }

    Ok(serde_json::from_value(payload)?)
}

#[async_trait]
impl Interpreter for SamplingInterpreter {
    async fn interpret(&self, prediction: &Prediction, question: &str) -> Result<String> {
        let params = build_request(prediction, question, self.max_tokens, self.model.as_deref())?;

        let result = self
            .peer
            .create_message(params)
            .await
            .map_err(|e| Error::Interpretation(format!("Sampling request failed: {}", e)))?;

        tracing::debug!(model = %result.model, "Received sampled interpretation");

        let message = serde_json::to_value(&result.message)?;
        extract_text(&message["content"])
            .ok_or_else(|| Error::Interpretation("Client returned no text content".to_string()))
    }
}

/// Pull the text out of a sampling message content, single or list form
fn extract_text(content: &Value) -> Option<String> {
    match content {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(extract_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("\n"))
            }
        }
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}
