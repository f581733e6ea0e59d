//! OpenAI-compatible HTTP transport.
//!
//! `HttpProvider` speaks the chat completions SSE protocol against any
//! endpoint that accepts it (OpenAI, DeepSeek, Grok, Qwen, Kimi, a local
//! Ollama instance, ...). Authentication schemes vary per service, so
//! construction goes through [`HttpProvider::bearer`],
//! [`HttpProvider::no_auth`], or [`HttpProvider::custom_header`].

use crate::{LLM, Message, Request, StreamChunk};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderName},
};

/// An LLM provider speaking the OpenAI-compatible streaming protocol.
#[derive(Clone)]
pub struct HttpProvider {
    /// The HTTP client.
    client: Client,
    /// Request headers (authorization, content-type).
    headers: HeaderMap,
    /// Chat completions endpoint URL.
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider authenticating with `Authorization: Bearer <key>`.
    pub fn bearer(client: Client, key: &str, endpoint: impl Into<String>) -> Result<Self> {
        let mut headers = base_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.into(),
        })
    }

    /// Create a provider without authentication (local endpoints).
    pub fn no_auth(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            headers: base_headers(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a provider authenticating with a custom header, e.g.
    /// `x-api-key`.
    pub fn custom_header(
        client: Client,
        name: &str,
        value: &str,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let mut headers = base_headers();
        headers.insert(name.parse::<HeaderName>()?, value.parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.into(),
        })
    }

    /// The request headers sent with every call.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The chat completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let json = header::HeaderValue::from_static("application/json");
    headers.insert(header::CONTENT_TYPE, json.clone());
    headers.insert(header::ACCEPT, json);
    headers
}

impl LLM for HttpProvider {
    type ChatConfig = Request;

    fn stream(
        &self,
        config: Request,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let body = config.messages(messages);
        tracing::debug!(
            "request: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );
        let request = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&body);

        try_stream! {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                Err(anyhow::anyhow!("provider returned {status}: {text}"))?;
            } else {
                let mut upstream = response.bytes_stream();
                // SSE events can split across network chunks, so lines are
                // reassembled in a carry buffer before parsing.
                let mut buffer = String::new();
                while let Some(bytes) = upstream.next().await {
                    let bytes = bytes?;
                    buffer.push_str(&String::from_utf8_lossy(&bytes));

                    while let Some(pos) = buffer.find('\n') {
                        let line: String = buffer.drain(..=pos).collect();
                        let Some(data) = line.trim().strip_prefix("data:") else {
                            continue;
                        };
                        let data = data.trim_start();
                        if data.is_empty() || data == "[DONE]" {
                            continue;
                        }
                        match serde_json::from_str::<StreamChunk>(data) {
                            Ok(chunk) => yield chunk,
                            Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {data}"),
                        }
                    }
                }
                tracing::debug!("stream closed");
            }
        }
    }
}
