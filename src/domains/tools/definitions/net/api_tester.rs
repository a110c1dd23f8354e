//! API tester tool definition.
//!
//! Sends one HTTP request and reports the status code and body. The request
//! has no timeout and no retry; the session tracks its phase.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument, warn};

use crate::domains::tools::definitions::common::pretty_json;
use crate::domains::tools::session::RequestPhase;
use crate::domains::tools::{StatefulTool, ToolContext, ToolError, ToolResult};

/// Supported request methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "patch")]
    Patch,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// Parameters for the API tester.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApiTestParams {
    /// Absolute http(s) URL.
    pub url: String,

    /// GET (default), POST, PUT, DELETE or PATCH.
    #[serde(default)]
    pub method: HttpMethod,

    /// JSON object of extra headers (default: "{}"). Merged over
    /// `Content-Type: application/json`.
    #[serde(default = "default_headers")]
    pub headers: String,

    /// JSON request body, ignored for GET. Empty sends no body.
    #[serde(default)]
    pub body: String,
}

fn default_headers() -> String {
    "{}".to_string()
}

/// A validated request, ready to send.
#[derive(Debug)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Validate headers and body without touching the network.
    pub fn from_params(params: &ApiTestParams) -> Result<Self, ToolError> {
        let headers = parse_headers(&params.headers)?;

        let body = match params.method {
            HttpMethod::Get => None,
            _ if params.body.trim().is_empty() => None,
            _ => {
                let parsed: serde_json::Value = serde_json::from_str(&params.body)
                    .map_err(|_| ToolError::validation("Body must be valid JSON."))?;
                Some(parsed.to_string())
            }
        };

        Ok(Self {
            method: params.method,
            url: params.url.trim().to_string(),
            headers,
            body,
        })
    }
}

/// Default `Content-Type` plus the caller's headers. Non-string values are
/// sent as their JSON text.
fn parse_headers(raw: &str) -> Result<HeaderMap, ToolError> {
    let parsed: serde_json::Value = serde_json::from_str(raw)
        .map_err(|_| ToolError::validation("Headers must be valid JSON."))?;
    let serde_json::Value::Object(fields) = parsed else {
        return Err(ToolError::validation("Headers must be a JSON object."));
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in fields {
        let text = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ToolError::validation(format!("Invalid header name: {}", name)))?;
        let header_value = HeaderValue::from_str(&text)
            .map_err(|_| ToolError::validation(format!("Invalid value for header {}", name)))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// API tester tool.
pub struct ApiTestTool;

impl StatefulTool for ApiTestTool {
    const NAME: &'static str = "api_test";
    const DESCRIPTION: &'static str = "Send an HTTP request (GET, POST, PUT, DELETE, PATCH) with optional JSON \
         headers and body. Returns the response body, pretty-printed when it is JSON, and the status code.";
    type Params = ApiTestParams;

    #[instrument(skip_all, fields(method = %params.method, url = %params.url))]
    async fn execute(params: &ApiTestParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let session = ctx.session();
        let request = PreparedRequest::from_params(params)?;
        let header_count = request.headers.len();

        session.set_api_phase(RequestPhase::Sending).await;
        let response = match send(session.http_client(), request).await {
            Ok(response) => response,
            Err(e) => {
                session.set_api_phase(RequestPhase::Error).await;
                return Err(e);
            }
        };
        session.set_api_phase(RequestPhase::Success).await;
        info!("Response status {}", response.status);

        let (output, extension) = match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(json) => (pretty_json(&json)?, "json"),
            Err(_) => (response.body, "txt"),
        };
        if !output.is_empty() {
            session
                .outputs()
                .record(Self::NAME, "api-response", extension, &output)
                .await;
        }

        Ok(ToolResult::success(output).with_stats(serde_json::json!({
            "status": response.status,
            "url_length": params.url.chars().count(),
            "headers_count": header_count,
        })))
    }
}

struct RawResponse {
    status: u16,
    body: String,
}

async fn send(client: &reqwest::Client, request: PreparedRequest) -> Result<RawResponse, ToolError> {
    let network_error = |e: reqwest::Error| {
        warn!("Request failed: {}", e);
        ToolError::network("Network error or invalid URL.")
    };

    let mut builder = client
        .request(request.method.as_reqwest(), &request.url)
        .headers(request.headers);
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await.map_err(network_error)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(network_error)?;
    Ok(RawResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::transform::run_stateful;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;

    fn params(url: &str, method: HttpMethod, headers: &str, body: &str) -> ApiTestParams {
        ApiTestParams {
            url: url.to_string(),
            method,
            headers: headers.to_string(),
            body: body.to_string(),
        }
    }

    /// Serve one canned HTTP response; returns the URL and the raw request.
    fn serve_once(body: &'static str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/posts", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 201 Created\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (url, handle)
    }

    /// Read a full request (headers plus Content-Length body).
    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    #[test]
    fn test_headers_must_be_json_object() {
        let err = parse_headers("not json").unwrap_err();
        assert_eq!(err.to_string(), "Headers must be valid JSON.");
        assert!(parse_headers("[1]").is_err());
    }

    #[test]
    fn test_headers_merge_over_default() {
        let headers =
            parse_headers(r#"{"Content-Type": "text/plain", "X-Retry": 3}"#).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers["x-retry"], "3");
    }

    #[test]
    fn test_body_rules() {
        let get = PreparedRequest::from_params(&params("http://x", HttpMethod::Get, "{}", "oops")).unwrap();
        assert!(get.body.is_none());

        let empty = PreparedRequest::from_params(&params("http://x", HttpMethod::Post, "{}", "  ")).unwrap();
        assert!(empty.body.is_none());

        let err = PreparedRequest::from_params(&params("http://x", HttpMethod::Post, "{}", "{bad"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Body must be valid JSON.");
    }

    #[test]
    fn test_method_accepts_lowercase() {
        let method: HttpMethod = serde_json::from_str("\"patch\"").unwrap();
        assert_eq!(method, HttpMethod::Patch);
        assert_eq!(method.to_string(), "PATCH");
    }

    #[tokio::test]
    async fn test_network_error_sets_phase() {
        let ctx = ToolContext::new(Arc::new(Config::default()));
        let result = run_stateful::<ApiTestTool>(
            &params("http://127.0.0.1:1/", HttpMethod::Get, "{}", ""),
            &ctx,
        )
        .await;
        assert_eq!(result.message(), Some("Network error or invalid URL."));
        assert_eq!(ctx.session().api_phase().await, RequestPhase::Error);
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let ctx = ToolContext::new(Arc::new(Config::default()));
        let result =
            run_stateful::<ApiTestTool>(&params("", HttpMethod::Get, "{}", ""), &ctx).await;
        assert_eq!(result.message(), Some("Network error or invalid URL."));
    }

    #[tokio::test]
    async fn test_round_trip_against_local_server() {
        let (url, server) = serve_once(r#"{"id":101,"title":"foo"}"#);
        let ctx = ToolContext::new(Arc::new(Config::default()));

        let result = run_stateful::<ApiTestTool>(
            &params(&url, HttpMethod::Post, r#"{"X-Token": "abc"}"#, r#"{"title": "foo"}"#),
            &ctx,
        )
        .await;

        assert_eq!(
            result.output(),
            Some("{\n  \"id\": 101,\n  \"title\": \"foo\"\n}")
        );
        assert_eq!(result.stats().unwrap()["status"], 201);
        assert_eq!(ctx.session().api_phase().await, RequestPhase::Success);

        let raw_request = server.join().unwrap().to_lowercase();
        assert!(raw_request.starts_with("post /posts"));
        assert!(raw_request.contains("content-type: application/json"));
        assert!(raw_request.contains("x-token: abc"));

        let stored = ctx.session().outputs().get("api_test").await.unwrap();
        assert_eq!(stored.extension, "json");
    }
}
