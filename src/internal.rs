use crate::{
    error::{self, GlikRequestError},
    response::ApiResponse,
    streaming::SseDecoder,
};
use async_stream::try_stream;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP method for API endpoints
#[derive(Debug, Clone)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Represents an API endpoint with its configuration
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    /// Path relative to the client base URL.
    pub path: String,
    /// HTTP method used for the call.
    pub method: HttpMethod,
    /// Optional query string parameters.
    pub query_params: Option<Vec<(String, String)>>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            query_params: None,
        }
    }

    pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = Some(params);
        self
    }
}

/// Request plumbing shared by every facade: assembles bearer-authenticated
/// requests against the configured base URL and issues them.
///
/// Sending never raises on a non-2xx status; callers opt in through
/// [`ApiResponse::error_for_status`].
#[derive(Clone)]
pub(crate) struct GlikRequestHelper {
    /// Shared connection pool.
    client: reqwest::Client,
    /// API root, e.g. `https://api.glik.ai/v1`.
    base_url: String,
    /// Bearer token for the `Authorization` header.
    api_key: String,
}

impl GlikRequestHelper {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a reqwest `RequestBuilder` for the given endpoint
    pub fn build_request(&self, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        self.build_request_with_options(endpoint, true)
    }

    /// Build a request, optionally skipping the JSON content-type (multipart
    /// bodies carry their own boundary header).
    fn build_request_with_options(
        &self,
        endpoint: &Endpoint,
        add_json_content_type: bool,
    ) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path.trim_start_matches('/')
        );
        let method: Method = endpoint.method.clone().into();

        let mut req = self.client.request(method, &url);

        if let Some(ref params) = endpoint.query_params {
            req = req.query(&params);
        }

        req = req.bearer_auth(&self.api_key);

        if add_json_content_type && matches!(endpoint.method, HttpMethod::Post) {
            req = req.header("content-type", "application/json");
        }

        req
    }

    /// Issue a request with an optional JSON body and hand back the raw
    /// response, whatever its status.
    pub async fn send<B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut req = self.build_request(endpoint);

        if let Some(body) = body {
            // Normalize to a Value to avoid any accidental double-encoding
            let val = serde_json::to_value(body)?;
            debug_dump(&endpoint.path, &val);
            req = req.json(&val);
        }

        let res = req.send().await?;
        Ok(ApiResponse::from(res))
    }

    /// Issue a multipart form request (file uploads, audio transcription).
    pub async fn send_multipart(
        &self,
        endpoint: &Endpoint,
        form: reqwest::multipart::Form,
    ) -> Result<ApiResponse, GlikRequestError> {
        let req = self.build_request_with_options(endpoint, false).multipart(form);

        let res = req.send().await?;
        Ok(ApiResponse::from(res))
    }

    /// Issue a streaming request and decode the body line by line.
    ///
    /// Unlike [`send`](Self::send), a non-success status is surfaced here as
    /// an error before any event is yielded; there is no response object to
    /// hand back once the body is being consumed incrementally.
    pub fn stream<T, B>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> BoxStream<'static, Result<T, GlikRequestError>>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize,
    {
        let body_value = match body.map(serde_json::to_value).transpose() {
            Ok(value) => value,
            Err(e) => {
                return stream::once(async move { Err(GlikRequestError::from(e)) }).boxed();
            }
        };

        let helper = self.clone();
        let endpoint = endpoint.clone();

        Box::pin(try_stream! {
            let mut req = helper.build_request(&endpoint);

            if let Some(ref val) = body_value {
                debug_dump(&endpoint.path, val);
                req = req.json(val);
            }

            let response = req.send().await?;
            let status = response.status();

            if !status.is_success() {
                let bytes = response.bytes().await?;
                Err(error::parse_error_response(status, bytes))?;
            } else {
                let mut decoder = SseDecoder::new(response);

                while let Some(event) = decoder.next_event().await? {
                    yield event;
                }
            }
        })
    }
}

/// Dump the outgoing payload to stderr when `GLIK_HTTP_DEBUG=1`.
fn debug_dump(path: &str, payload: &Value) {
    if std::env::var("GLIK_HTTP_DEBUG")
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        eprintln!("[glik-ox] {path} payload: {payload}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> GlikRequestHelper {
        GlikRequestHelper::new(
            reqwest::Client::new(),
            "https://api.glik.ai/v1",
            "test-key",
        )
    }

    #[test]
    fn test_url_formation_normalizes_slashes() {
        let helper = GlikRequestHelper::new(
            reqwest::Client::new(),
            "https://api.glik.ai/v1/",
            "test-key",
        );
        let endpoint = Endpoint::new("/chat-messages", HttpMethod::Post);

        let req = helper.build_request(&endpoint).build().unwrap();
        assert_eq!(req.url().as_str(), "https://api.glik.ai/v1/chat-messages");
        assert_eq!(req.method(), &Method::POST);
    }

    #[test]
    fn test_bearer_authorization_header() {
        let endpoint = Endpoint::new("parameters", HttpMethod::Get);

        let req = helper().build_request(&endpoint).build().unwrap();
        let auth = req.headers().get("authorization").unwrap();
        assert_eq!(auth, "Bearer test-key");
    }

    #[test]
    fn test_json_content_type_only_on_post() {
        let post = Endpoint::new("chat-messages", HttpMethod::Post);
        let get = Endpoint::new("parameters", HttpMethod::Get);

        let post_req = helper().build_request(&post).build().unwrap();
        assert_eq!(
            post_req.headers().get("content-type").unwrap(),
            "application/json"
        );

        let get_req = helper().build_request(&get).build().unwrap();
        assert!(get_req.headers().get("content-type").is_none());
    }

    #[test]
    fn test_query_params_attached() {
        let endpoint = Endpoint::new("conversations", HttpMethod::Get).with_query_params(vec![
            ("user".to_string(), "test_user".to_string()),
            ("limit".to_string(), "20".to_string()),
        ]);

        let req = helper().build_request(&endpoint).build().unwrap();
        assert_eq!(req.url().query(), Some("user=test_user&limit=20"));
    }

    #[test]
    fn test_building_requests_never_mutates_credentials() {
        let helper = helper();
        let api_key_before = helper.api_key.clone();
        let base_url_before = helper.base_url.clone();

        for endpoint in [
            Endpoint::new("chat-messages", HttpMethod::Post),
            Endpoint::new("parameters", HttpMethod::Get),
            Endpoint::new("conversations/abc", HttpMethod::Delete),
        ] {
            let _ = helper.build_request(&endpoint).build().unwrap();
        }

        assert_eq!(helper.api_key, api_key_before);
        assert_eq!(helper.base_url, base_url_before);
    }
}
