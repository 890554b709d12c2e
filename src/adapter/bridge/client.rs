//! Bridge API Client
//!
//! LmsRepositoryのreqwest実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::models::{
    id_to_json, CreateSessionsRequest, RegistrationRequest, SessionsResponse, SubAccountResponse,
    UsersResponse,
};
use crate::adapter::config::Config;
use crate::domain::repositories::lms_repository::{
    AccountSettings, ApiFailure, ApiResult, LmsRepository,
};
use crate::domain::services::session_planner::SessionWindow;

/// Convert an error and all of its sources into one line
pub fn error_chain_to_string(e: &(dyn std::error::Error + 'static)) -> String {
    let mut messages = vec![e.to_string()];
    let mut source = e.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages.join(" | ")
}

/// Bridge REST client for one account
pub struct BridgeClient {
    http: Client,
    base_url: Url,
    authorization: String,
}

impl BridgeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            authorization: config.authorization_header(),
        })
    }

    /// Join path segments onto the API root, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
    }
}

async fn send(request: RequestBuilder) -> ApiResult<Response> {
    request
        .send()
        .await
        .map_err(|e| ApiFailure::Transport(error_chain_to_string(&e)))
}

fn expect_status(response: Response, expected: StatusCode) -> ApiResult<Response> {
    let status = response.status();
    if status == expected {
        Ok(response)
    } else {
        debug!("Expected {} but got {} from {}", expected, status, response.url());
        Err(ApiFailure::Status(status.as_u16()))
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiFailure::Malformed(error_chain_to_string(&e)))
}

fn first_session_id(body: SessionsResponse) -> ApiResult<String> {
    body.sessions
        .into_iter()
        .next()
        .map(|session| session.id.into_string())
        .ok_or_else(|| ApiFailure::Malformed("no session in response".to_string()))
}

fn first_user_id(body: UsersResponse, uid: &str) -> ApiResult<String> {
    body.users
        .into_iter()
        .next()
        .map(|user| user.id.into_string())
        .ok_or_else(|| ApiFailure::Malformed(format!("no user returned for uid {}", uid)))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl LmsRepository for BridgeClient {
    async fn fetch_account_settings(&self) -> ApiResult<AccountSettings> {
        let url = self.endpoint(&["config", "sub_account"]);
        let response = expect_status(send(self.request(Method::GET, url)).await?, StatusCode::OK)?;
        let body: SubAccountResponse = parse_json(response).await?;

        Ok(AccountSettings {
            timezone: body.time_zone(),
        })
    }

    async fn create_session(
        &self,
        live_course_id: &str,
        window: &SessionWindow,
    ) -> ApiResult<String> {
        let url = self.endpoint(&["author", "live_courses", live_course_id, "sessions"]);
        let request = self
            .request(Method::POST, url)
            .json(&CreateSessionsRequest::from(window));
        let response = expect_status(send(request).await?, StatusCode::CREATED)?;
        first_session_id(parse_json(response).await?)
    }

    async fn publish_session(&self, live_course_id: &str, session_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&[
            "author",
            "live_courses",
            live_course_id,
            "sessions",
            session_id,
            "publish",
        ]);
        expect_status(send(self.request(Method::POST, url)).await?, StatusCode::OK)?;
        Ok(())
    }

    async fn find_user_id(&self, uid: &str) -> ApiResult<String> {
        let segment = format!("uid:{}", uid);
        let url = self.endpoint(&["author", "users", &segment]);
        let response = expect_status(send(self.request(Method::GET, url)).await?, StatusCode::OK)?;
        first_user_id(parse_json(response).await?, uid)
    }

    async fn register_user(&self, session_id: &str, user_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["author", "live_course_sessions", session_id, "registrations"]);
        let request = self
            .request(Method::POST, url)
            .json(&RegistrationRequest {
                user_id: id_to_json(user_id),
            });
        expect_status(send(request).await?, StatusCode::NO_CONTENT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::migration_log::LogStatus;
    use std::path::PathBuf;

    fn client(base_url: Option<&str>) -> BridgeClient {
        let config = Config::new(
            "acme",
            "abc123",
            PathBuf::from("enrollments.csv"),
            PathBuf::from("."),
            base_url,
        )
        .unwrap();
        BridgeClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_sub_account() {
        let url = client(None).endpoint(&["config", "sub_account"]);
        assert_eq!(url.as_str(), "https://acme.bridgeapp.com/api/config/sub_account");
    }

    #[test]
    fn test_endpoint_publish() {
        let url = client(None).endpoint(&["author", "live_courses", "10", "sessions", "555", "publish"]);
        assert_eq!(
            url.as_str(),
            "https://acme.bridgeapp.com/api/author/live_courses/10/sessions/555/publish"
        );
    }

    #[test]
    fn test_endpoint_encodes_uid() {
        let url = client(None).endpoint(&["author", "users", "uid:jane doe/1"]);
        assert_eq!(
            url.as_str(),
            "https://acme.bridgeapp.com/api/author/users/uid:jane%20doe%2F1"
        );
    }

    #[test]
    fn test_endpoint_with_base_url_override() {
        let url = client(Some("http://127.0.0.1:9000/api")).endpoint(&["config", "sub_account"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/config/sub_account");
    }

    #[test]
    fn test_authorization_header_is_bearer() {
        assert_eq!(client(None).authorization, "Bearer abc123");
    }

    fn response(status: u16, body: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn test_expect_status_rejects_other_success_codes() {
        let err = expect_status(response(200, ""), StatusCode::CREATED).unwrap_err();
        assert_eq!(err, ApiFailure::Status(200));
        assert_eq!(err.log_status(), LogStatus::Http(200));
    }

    #[test]
    fn test_expect_status_no_content() {
        let ok = expect_status(response(204, ""), StatusCode::NO_CONTENT);
        assert_eq!(ok.map(|r| r.status()).ok(), Some(StatusCode::NO_CONTENT));

        let err = expect_status(response(200, ""), StatusCode::NO_CONTENT).unwrap_err();
        assert_eq!(err, ApiFailure::Status(200));
    }

    #[test]
    fn test_expect_status_not_found() {
        let err = expect_status(response(404, "{}"), StatusCode::OK).unwrap_err();
        assert_eq!(err, ApiFailure::Status(404));
    }

    #[tokio::test]
    async fn test_parse_json_invalid_body() {
        let err = parse_json::<SessionsResponse>(response(201, "<html>oops</html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiFailure::Malformed(_)));
        assert_eq!(err.log_status(), LogStatus::Unknown);
    }

    #[tokio::test]
    async fn test_created_session_id() {
        let body = parse_json::<SessionsResponse>(response(201, r#"{"sessions":[{"id":555}]}"#))
            .await
            .unwrap();
        assert_eq!(first_session_id(body), Ok("555".to_string()));
    }

    #[tokio::test]
    async fn test_created_without_session() {
        let body = parse_json::<SessionsResponse>(response(201, r#"{"sessions":[]}"#))
            .await
            .unwrap();
        assert_eq!(
            first_session_id(body),
            Err(ApiFailure::Malformed("no session in response".to_string()))
        );
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let found = parse_json::<UsersResponse>(response(200, r#"{"users":[{"id":"42"}]}"#))
            .await
            .unwrap();
        assert_eq!(first_user_id(found, "jdoe"), Ok("42".to_string()));

        let empty = parse_json::<UsersResponse>(response(200, r#"{"users":[]}"#))
            .await
            .unwrap();
        let err = first_user_id(empty, "jdoe").unwrap_err();
        assert_eq!(err, ApiFailure::Malformed("no user returned for uid jdoe".to_string()));
        assert_eq!(err.log_status(), LogStatus::Unknown);
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_to_string() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(error_chain_to_string(&err), "request failed | connection refused");
    }
}
