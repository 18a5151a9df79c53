//! Gemini generateContent API type definitions

mod client;

use serde::{Deserialize, Serialize};

pub use client::{HttpProviderClient, ProviderCallError, ProviderClient, ProviderReply};

/// Request body for the generateContent endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction,
}

/// A content entry; parts are role-less single-turn text
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A single text part
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Part {
    pub text: String,
}

/// Tool capability entry; `google_search: {}` enables search augmentation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// Empty marker object for the google_search tool
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleSearch {}

/// System instruction block sent with every request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl GenerateContentRequest {
    /// Build the payload for one prompt: the prompt text as a single part,
    /// the deployment's system instruction, and the search tool enabled.
    pub fn new(prompt: &str, system_instruction: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
        }
    }

    /// The prompt text carried by this payload, if any
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = GenerateContentRequest::new("What is Ohm's law?", "Answer briefly.");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is Ohm's law?");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Answer briefly.");
        assert_eq!(json["tools"][0]["google_search"], serde_json::json!({}));
    }

    #[test]
    fn test_payload_single_content_entry() {
        let payload = GenerateContentRequest::new("prompt", "instruction");
        assert_eq!(payload.contents.len(), 1);
        assert_eq!(payload.contents[0].parts.len(), 1);
        assert_eq!(payload.tools.len(), 1);
        assert_eq!(payload.prompt_text(), Some("prompt"));
    }

    #[test]
    fn test_payload_round_trips_prompt_verbatim() {
        let prompt = "  spaces and \"quotes\" survive \n newlines  ";
        let payload = GenerateContentRequest::new(prompt, "instruction");
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: GenerateContentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.prompt_text(), Some(prompt));
    }
}
