pub(crate) mod api;


use crate::app_error::AppError;
use crate::cli::Model;
use crate::logger::Logger;
use api::{LlmApi, LlmApiClient};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

pub(crate) fn generate_request_id(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let n = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    if prefix.is_empty() {
        format!("req-{now}-{n}")
    } else {
        format!("{prefix}-{now}-{n}")
    }
}

/// A text-in, text-out generative model.
///
/// `log_prefix` names the exchange in the run log (for example `2-test-stubs`).
pub trait TextCompletionService {
    fn model_name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        log_prefix: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + 'a>>;
}

/// Completion service backed by a hosted model API.
pub struct LlmCompletionService {
    api_client: LlmApiClient,
    logger: Logger,
}

impl LlmCompletionService {
    pub fn new(model: Model, api_key: String, logger: Logger) -> Self {
        let api_client = match model {
            Model::Gemini1_5Pro => {
                LlmApiClient::Gemini(api::GeminiClient::new(api_key, "gemini-1.5-pro"))
            }
            Model::Gemini2_5Pro => {
                LlmApiClient::Gemini(api::GeminiClient::new(api_key, "gemini-2.5-pro"))
            }
            Model::Gpt5 => LlmApiClient::Gpt(api::GptClient::new(api_key)),
        };
        Self { api_client, logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl TextCompletionService for LlmCompletionService {
    fn model_name(&self) -> &str {
        self.api_client.get_model_name()
    }

    fn complete<'a>(
        &'a self,
        log_prefix: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + 'a>> {
        Box::pin(query_internal(
            &self.api_client,
            prompt,
            &self.logger,
            log_prefix,
        ))
    }
}

async fn query_internal(
    api_client: &dyn LlmApi,
    prompt: &str,
    logger: &Logger,
    log_prefix: &str,
) -> Result<String, AppError> {
    logger.log_text(&format!("{log_prefix}-query.txt"), prompt)?;

    let request_body = api_client.build_request_body(prompt);
    let log_body = json!({
        "url": api_client.get_url(),
        "model": api_client.get_model_name(),
        "body": &request_body,
        "requestId": generate_request_id("llm"),
    });
    logger.log_json(&format!("{log_prefix}-query.json"), &log_body)?;

    let start_time = Instant::now();
    let response_result = api_client.query(&request_body).await;
    let duration = start_time.elapsed();

    println!(
        "LLM call to {} took {:.3}s",
        api_client.get_model_name(),
        duration.as_secs_f64()
    );

    let response_json = match response_result {
        Ok(json) => json,
        Err(e) => {
            let error_json =
                json!({ "error": e.to_string(), "totalResponseTime": duration.as_millis() });
            logger.log_json(&format!("{log_prefix}-response.json"), &error_json)?;
            logger.log_text(&format!("{log_prefix}-response.txt"), &format!("ERROR\n{e}"))?;
            return Err(e);
        }
    };

    let mut logged_response = response_json.clone();
    if let Some(obj) = logged_response.as_object_mut() {
        obj.insert("totalResponseTime".to_string(), json!(duration.as_millis()));
    } else {
        logged_response = json!({
            "response_payload": logged_response,
            "totalResponseTime": duration.as_millis(),
        });
    }
    logger.log_json(&format!("{log_prefix}-response.json"), &logged_response)?;

    let response_text = match api_client.extract_text_from_response(&response_json) {
        Ok(text) => text,
        Err(e) => {
            logger.log_text(&format!("{log_prefix}-response.txt"), &format!("ERROR\n{e}"))?;
            return Err(e);
        }
    };
    logger.log_text(&format!("{log_prefix}-response.txt"), &response_text)?;

    Ok(response_text)
}
