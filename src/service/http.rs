//! Parish web API client over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, cookie::Jar};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::ParishService;
use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::models::{InviteOutcome, NewPetition, Parish, ParishMember, ParishUpdate, Petition, Role};

/// Parish API client.
///
/// Keeps a cookie store so a browser-style session works, and adds a bearer
/// token when one is configured.
pub struct HttpParishService {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

#[derive(Deserialize)]
struct MembersResponse {
    #[serde(default)]
    members: Vec<ParishMember>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl HttpParishService {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let raw = config.base_url.trim();
        let base_url =
            Url::parse(raw).map_err(|e| AppError::config(format!("Invalid server URL '{raw}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(AppError::config(format!("Invalid server URL '{raw}'")));
        }

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let token = config.api_token.trim();
        Ok(Self {
            client,
            base_url,
            api_token: (!token.is_empty()).then(|| token.to_string()),
        })
    }

    /// Base URL plus the given path segments, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("Server URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(message));
        }
        Err(AppError::api(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pull a readable message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(msg) = parsed.error.or(parsed.message)
    {
        return msg;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 {
        return trimmed.to_string();
    }

    status.canonical_reason().unwrap_or("Request failed").to_string()
}

#[async_trait]
impl ParishService for HttpParishService {
    async fn current_parish(&self) -> Result<Option<Parish>> {
        let request = self.client.get(self.endpoint(&["api", "parish", "current"])?);
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Self::decode(response).await
    }

    async fn parish_members(&self, parish_id: &str) -> Result<Vec<ParishMember>> {
        let request = self.client.get(self.endpoint(&["api", "parishes", parish_id, "members"])?);
        let body: MembersResponse = Self::decode(self.send(request).await?).await?;
        debug!("Fetched {} members for parish {}", body.members.len(), parish_id);
        Ok(body.members)
    }

    async fn update_parish(&self, parish_id: &str, update: &ParishUpdate) -> Result<()> {
        let request = self
            .client
            .patch(self.endpoint(&["api", "parishes", parish_id])?)
            .json(update);
        self.send(request).await?;
        Ok(())
    }

    async fn invite_member(&self, parish_id: &str, email: &str, roles: &[Role]) -> Result<InviteOutcome> {
        let request = self
            .client
            .post(self.endpoint(&["api", "parishes", parish_id, "members", "invite"])?)
            .json(&json!({ "email": email, "roles": roles }));
        Self::decode(self.send(request).await?).await
    }

    async fn remove_member(&self, parish_id: &str, user_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.endpoint(&["api", "parishes", parish_id, "members", user_id])?);
        self.send(request).await?;
        Ok(())
    }

    async fn update_member_roles(&self, parish_id: &str, user_id: &str, roles: &[Role]) -> Result<()> {
        let request = self
            .client
            .put(self.endpoint(&["api", "parishes", parish_id, "members", user_id, "roles"])?)
            .json(&json!({ "roles": roles }));
        self.send(request).await?;
        Ok(())
    }

    async fn create_petition(&self, petition: &NewPetition) -> Result<Petition> {
        let request = self.client.post(self.endpoint(&["api", "petitions"])?).json(petition);
        Self::decode(self.send(request).await?).await
    }

    async fn ping(&self) -> Result<()> {
        let request = self.client.get(self.endpoint(&["api", "health"])?);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base_url: &str, token: &str) -> HttpParishService {
        let config = ServerConfig {
            base_url: base_url.to_string(),
            api_token: token.to_string(),
            timeout_secs: 5,
        };
        HttpParishService::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let svc = service("https://parish.example.org/", "");
        assert_eq!(
            svc.endpoint(&["api", "parishes", "abc", "members"]).unwrap().as_str(),
            "https://parish.example.org/api/parishes/abc/members"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let svc = service("https://parish.example.org", "");
        let url = svc
            .endpoint(&["api", "parishes", "abc", "members", "a/b c", "roles"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://parish.example.org/api/parishes/abc/members/a%2Fb%20c/roles"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let svc = service("https://example.org/parish/", "");
        assert_eq!(
            svc.endpoint(&["api", "health"]).unwrap().as_str(),
            "https://example.org/parish/api/health"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = ServerConfig {
            base_url: "parish.example.org".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(HttpParishService::new(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        assert!(service("http://localhost:3000", "   ").api_token.is_none());
        assert_eq!(
            service("http://localhost:3000", "tok").api_token.as_deref(),
            Some("tok")
        );
    }

    #[test]
    fn test_error_message_from_json_error_field() {
        let msg = error_message(StatusCode::FORBIDDEN, r#"{"error":"Only parish admins can invite members"}"#);
        assert_eq!(msg, "Only parish admins can invite members");
    }

    #[test]
    fn test_error_message_from_json_message_field() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"Invalid email"}"#);
        assert_eq!(msg, "Invalid email");
    }

    #[test]
    fn test_error_message_plain_text_body() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "upstream unavailable\n");
        assert_eq!(msg, "upstream unavailable");
    }

    #[test]
    fn test_error_message_empty_body_uses_reason() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn test_members_response_defaults_to_empty() {
        let body: MembersResponse = serde_json::from_str("{}").unwrap();
        assert!(body.members.is_empty());
    }
}
