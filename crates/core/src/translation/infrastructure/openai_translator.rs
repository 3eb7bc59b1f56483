use serde::{Deserialize, Serialize};

use crate::translation::domain::translator::{TranslationError, Translator};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Items in a batch request and response are separated by this line.
pub const BATCH_SEPARATOR: &str = "\n---\n";

/// Chat-completions translator for OpenAI-compatible endpoints.
pub struct OpenAiTranslator {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn complete(&self, system: String, user: String) -> Result<String, TranslationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("POST {url} (model {})", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranslationError::Request(format!(
                "HTTP {status}: {}",
                api_error_message(&body)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| TranslationError::Response(e.to_string()))?;
        first_choice_content(parsed)
    }
}

impl Translator for OpenAiTranslator {
    fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let content = self.complete(
            batch_instructions(source, target),
            format!(
                "Translate the following {source} text into {target}:\n\n{}",
                join_batch(texts)
            ),
        )?;
        Ok(split_batch(&content))
    }

    fn translate_one(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let content = self.complete(
            format!("Translate {source} into natural, concise {target}. Reply with the translation only."),
            text.to_string(),
        )?;
        Ok(content.trim().to_string())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

fn batch_instructions(source: &str, target: &str) -> String {
    format!(
        "You are a professional {source} to {target} translator. \
         Translate naturally and concisely for subtitles. \
         Items are separated by a line containing only '---'. \
         Keep every separator and the number of items unchanged. \
         Reply with the translations only."
    )
}

fn join_batch(texts: &[String]) -> String {
    texts.join(BATCH_SEPARATOR)
}

fn split_batch(content: &str) -> Vec<String> {
    content
        .trim()
        .split(BATCH_SEPARATOR)
        .map(|item| item.trim().to_string())
        .collect()
}

/// The `error.message` of an API error body, or the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn first_choice_content(response: ChatResponse) -> Result<String, TranslationError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| TranslationError::Response("no choices in response".to_string()))
}
