//! Outgoing request description and its execution over HTTP.

use std::fmt;

use itertools::Itertools;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{FetchError, Provider, QueryOptions};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A fully built provider request. Building one never touches the network.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub provider: Provider,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ProviderRequest {
    pub fn get(provider: Provider, url: String) -> Self {
        Self {
            provider,
            method: HttpMethod::Get,
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ],
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded query parameters of the request URL, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some((_, query)) = self.url.split_once('?') else {
            return Vec::new();
        };
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

fn decode(text: &str) -> String {
    urlencoding::decode(text).map_or_else(|_| text.to_string(), |s| s.into_owned())
}

/// Raw answer of a provider: status and parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Ordered parameter bag with object-spread semantics: setting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    entries: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        self
    }

    /// Merge every option, later keys winning.
    pub fn extend(&mut self, options: &QueryOptions) -> &mut Self {
        for (key, value) in options.iter() {
            self.set(key, value.clone());
        }
        self
    }

    /// Merge every option except the ones listed.
    pub fn extend_except(&mut self, options: &QueryOptions, skip: &[&str]) -> &mut Self {
        for (key, value) in options.iter().filter(|(k, _)| !skip.contains(&k.as_str())) {
            self.set(key, value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Percent-encoded `key=value` pairs joined by `&`; empty values are left out.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                param_text(value).map(|text| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(&text))
                })
            })
            .join("&")
    }

    /// Append the query string to `base`, respecting an existing `?`.
    pub fn attach_to(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else if base.contains('?') {
            format!("{base}&{query}")
        } else {
            format!("{base}?{query}")
        }
    }
}

/// Text form of a parameter value, `None` when the parameter must be omitted.
fn param_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().filter_map(param_text).join(","),
        Value::Object(_) => value.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Send the request and parse the body. Non-2xx answers become [`FetchError::Status`].
pub async fn execute(client: &Client, request: &ProviderRequest) -> Result<RawResponse, FetchError> {
    let mut builder = match request.method {
        HttpMethod::Get => client.get(&request.url),
        HttpMethod::Post => client.post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    // Keys travel in the query string; keep URLs out of transport errors.
    let response = builder.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    debug!(provider = %request.provider, status = status.as_u16(), "Provider responded");
    if !status.is_success() {
        return Err(FetchError::Status {
            provider: request.provider,
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(reqwest::Error::without_url)?;
    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(RawResponse {
        status: status.as_u16(),
        body,
    })
}
