use crate::app_error::AppError;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const GPT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const GPT_MODEL_NAME: &str = "gpt-5";

// Failure classification for a single request; every variant is fatal.
#[derive(Debug)]
pub(crate) enum QueryError {
    Http { status: StatusCode, body: String },
    Transport { message: String },
    InvalidJson { body: String, parse_error: String },
}

fn build_http_client() -> Client {
    Client::builder()
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .build()
        .unwrap_or_else(|_| Client::new())
}

pub(crate) struct GeminiClient {
    client: Client,
    api_key: String,
    model_name: String,
    api_url: String,
}

impl GeminiClient {
    pub(crate) fn new(api_key: String, model_name: &str) -> Self {
        let api_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent"
        );
        Self {
            client: build_http_client(),
            api_key,
            model_name: model_name.to_string(),
            api_url,
        }
    }

    async fn query_once(&self, request_body: &Value) -> Result<Value, QueryError> {
        let resp = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", &self.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| QueryError::Transport {
                message: censor_api_key_in_error_string(e, &self.api_key),
            })?;

        handle_response_to_json(resp, &self.api_key).await
    }
}

pub(crate) struct GptClient {
    client: Client,
    api_key: String,
}

impl GptClient {
    pub(crate) fn new(api_key: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
        }
    }

    async fn query_once(&self, request_body: &Value) -> Result<Value, QueryError> {
        let resp = self
            .client
            .post(GPT_API_URL)
            .bearer_auth(&self.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| QueryError::Transport {
                message: censor_api_key_in_error_string(e, &self.api_key),
            })?;

        handle_response_to_json(resp, &self.api_key).await
    }
}

pub(crate) enum LlmApiClient {
    Gemini(GeminiClient),
    Gpt(GptClient),
}

impl LlmApiClient {
    pub(crate) fn get_model_name(&self) -> &str {
        match self {
            LlmApiClient::Gemini(c) => &c.model_name,
            LlmApiClient::Gpt(_) => GPT_MODEL_NAME,
        }
    }

    pub(crate) fn get_url(&self) -> &str {
        match self {
            LlmApiClient::Gemini(c) => &c.api_url,
            LlmApiClient::Gpt(_) => GPT_API_URL,
        }
    }

    pub(crate) fn build_request_body(&self, prompt: &str) -> Value {
        match self {
            LlmApiClient::Gemini(_) => json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "temperature": 0.2
                }
            }),
            LlmApiClient::Gpt(_) => json!({
                "model": GPT_MODEL_NAME,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are CodeReviewBot, an automated code review assistant."
                    },
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
            }),
        }
    }

    /// Exactly one request. Failures are surfaced to the caller unchanged.
    pub(crate) async fn query(&self, request_body: &Value) -> Result<Value, AppError> {
        let result = match self {
            LlmApiClient::Gemini(c) => c.query_once(request_body).await,
            LlmApiClient::Gpt(c) => c.query_once(request_body).await,
        };
        result.map_err(map_query_error_to_app_error)
    }

    pub(crate) fn extract_text_from_response(&self, response: &Value) -> Result<String, AppError> {
        match self {
            LlmApiClient::Gemini(_) => extract_text_from_gemini_response(response),
            LlmApiClient::Gpt(_) => extract_text_from_gpt_response(response),
        }
    }
}

pub(crate) trait LlmApi: Send + Sync {
    fn get_model_name(&self) -> &str;
    fn get_url(&self) -> &str;
    fn build_request_body(&self, prompt: &str) -> Value;
    fn query<'a>(
        &'a self,
        request_body: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, AppError>> + Send + 'a>>;
    fn extract_text_from_response(&self, response: &Value) -> Result<String, AppError>;
}

impl LlmApi for LlmApiClient {
    fn get_model_name(&self) -> &str {
        LlmApiClient::get_model_name(self)
    }

    fn get_url(&self) -> &str {
        LlmApiClient::get_url(self)
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        LlmApiClient::build_request_body(self, prompt)
    }

    fn query<'a>(
        &'a self,
        request_body: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, AppError>> + Send + 'a>> {
        Box::pin(LlmApiClient::query(self, request_body))
    }

    fn extract_text_from_response(&self, response: &Value) -> Result<String, AppError> {
        LlmApiClient::extract_text_from_response(self, response)
    }
}

pub(crate) fn map_query_error_to_app_error(e: QueryError) -> AppError {
    match e {
        QueryError::Http { status, body } => {
            AppError::Network(format!("HTTP {status} with body:\n{body}"))
        }
        QueryError::Transport { message } => AppError::Network(message),
        QueryError::InvalidJson { body, parse_error } => AppError::Network(format!(
            "Invalid JSON in success response: {parse_error}; raw body:\n{body}"
        )),
    }
}

pub(crate) fn censor_api_key(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    let censored_key = match api_key.get(api_key.len().saturating_sub(4)..) {
        Some(tail) if api_key.len() > 8 => format!("...{tail}"),
        _ => "...".to_string(),
    };
    text.replace(api_key, &censored_key)
}

fn censor_api_key_in_error_string(e: reqwest::Error, api_key: &str) -> String {
    censor_api_key(&e.to_string(), api_key)
}

async fn handle_response_to_json(
    resp: reqwest::Response,
    api_key: &str,
) -> Result<Value, QueryError> {
    let status = resp.status();

    let text = resp.text().await.map_err(|e| QueryError::Transport {
        message: censor_api_key_in_error_string(e, api_key),
    })?;

    if !status.is_success() {
        return Err(QueryError::Http {
            status,
            body: censor_api_key(&text, api_key),
        });
    }

    serde_json::from_str::<Value>(&text).map_err(|e| QueryError::InvalidJson {
        body: censor_api_key(&text, api_key),
        parse_error: e.to_string(),
    })
}

pub(crate) fn extract_text_from_gemini_response(response: &Value) -> Result<String, AppError> {
    let parts_array = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            AppError::ResponseParsing(
                "Could not find 'parts' array in Gemini response JSON.".to_string(),
            )
        })?;

    let text_segments: Vec<&str> = parts_array
        .iter()
        .filter_map(|part| part.get("text"))
        .filter_map(|text_val| text_val.as_str())
        .collect();

    if text_segments.is_empty() {
        return Err(AppError::ResponseParsing(
            "Found 'parts' array, but it contained no valid text segments.".to_string(),
        ));
    }

    Ok(text_segments.concat())
}

pub(crate) fn extract_text_from_gpt_response(response: &Value) -> Result<String, AppError> {
    let content = response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            AppError::ResponseParsing("Could not find 'content' in GPT response JSON.".to_string())
        })?;
    Ok(content.to_string())
}
