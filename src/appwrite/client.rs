//! HTTP plumbing shared by the Appwrite services.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::Error;

/// API response format version the client asks for.
const RESPONSE_FORMAT: &str = "1.6.0";

/// Shared HTTP client for one Appwrite project.
///
/// Session state lives either in the in-process cookie store (filled when a
/// session is created over this client) or in an explicit session secret
/// passed at construction time. One `Client` therefore represents at most
/// one caller. Construct it once at startup; the service handles keep cheap
/// clones and nothing is mutated afterwards.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    session: Option<String>,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            session: None,
        })
    }

    /// Attaches a previously issued session secret, sent as the
    /// `X-Appwrite-Session` header on every request.
    pub fn with_session(mut self, secret: impl Into<String>) -> Self {
        self.session = Some(secret.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Response-Format", RESPONSE_FORMAT);
        if let Some(secret) = &self.session {
            builder = builder.header("X-Appwrite-Session", secret);
        }
        builder
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self.post_response(path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    /// POST variant that hands back the checked response so the caller can
    /// look at headers or cookies before decoding the body.
    pub(crate) async fn post_response<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, Error> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::check(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        let response = self
            .request(reqwest::Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self
            .request(reqwest::Method::PATCH, path)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Converts a non-success response into [`Error::Api`], decoding the
    /// platform's `{message, code, type}` error body when it has one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        match response.json::<ApiError>().await {
            Ok(body) => Err(Error::Api {
                code: if body.code == 0 { status } else { body.code },
                kind: body.kind,
                message: body.message,
            }),
            Err(_) => Err(Error::Api {
                code: status,
                kind: "unknown".to_string(),
                message: format!("server returned status {}", status),
            }),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Error body returned by the platform.
#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: u16,
    #[serde(rename = "type", default)]
    kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = Config {
            endpoint: "https://appwrite.local/v1/".to_string(),
            ..Config::default()
        };
        let client = Client::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://appwrite.local/v1");
    }

    #[test]
    fn test_api_error_body_decodes() {
        let body: ApiError = serde_json::from_str(
            r#"{"message":"Invalid credentials","code":401,"type":"user_invalid_credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.code, 401);
        assert_eq!(body.kind, "user_invalid_credentials");
        assert_eq!(body.message, "Invalid credentials");
    }
}
