use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{ApiError, ArticleApi};
use crate::config::Config;
use crate::models::{Article, CreateOutcome, Draft};

#[derive(Debug, Serialize)]
struct NewArticleRequest<'a> {
    article: &'a Draft,
}

#[derive(Debug, Deserialize)]
struct ArticleEnvelope {
    article: Article,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: BTreeMap<String, Value>,
}

/// reqwest client for a Conduit API
#[derive(Debug, Clone)]
pub struct ConduitClient {
    http: Client,
    base_url: String,
}

impl ConduitClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ArticleApi for ConduitClient {
    async fn create_article(&self, draft: &Draft, token: &str) -> Result<CreateOutcome, ApiError> {
        let url = format!("{}/articles", self.base_url);
        debug!(
            "POST {} (title: {:?}, {} tags)",
            url,
            draft.title,
            draft.tag_list.len()
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Token {}", token))
            .json(&NewArticleRequest { article: draft })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            let envelope: ArticleEnvelope =
                serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
                    context: "create article",
                    source,
                })?;
            info!("Created article '{}'", envelope.article.slug);
            return Ok(CreateOutcome::Created(envelope.article));
        }

        let messages = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
            Ok(envelope) if !envelope.errors.is_empty() => flatten_errors(&envelope.errors),
            _ => vec![format!("request failed with status {}", status)],
        };
        warn!("Article rejected ({}): {:?}", status, messages);

        Ok(CreateOutcome::Rejected(messages))
    }
}

/// Turn a `{field: [message, ...]}` error body into display lines
/// of the form `"field message"`.
pub fn flatten_errors(errors: &BTreeMap<String, Value>) -> Vec<String> {
    let mut lines = Vec::new();
    for (field, value) in errors {
        match value {
            Value::Array(items) => {
                for item in items {
                    lines.push(format!("{} {}", field, value_text(item)));
                }
            }
            other => lines.push(format!("{} {}", field, value_text(other))),
        }
    }
    lines
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
