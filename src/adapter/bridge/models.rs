//! Bridge API Wire Models
//!
//! リクエスト/レスポンスのJSON表現

use serde::{Deserialize, Serialize};

use crate::domain::services::session_planner::SessionWindow;

/// An id that Bridge may return as a JSON number or string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(u64),
    Text(String),
}

impl RemoteId {
    pub fn into_string(self) -> String {
        match self {
            RemoteId::Number(n) => n.to_string(),
            RemoteId::Text(s) => s,
        }
    }
}

/// Numeric ids go back to the API as JSON numbers, anything else as a string
pub fn id_to_json(id: &str) -> serde_json::Value {
    match id.parse::<u64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(id),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdOnly {
    pub id: RemoteId,
}

/// `GET config/sub_account`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubAccountResponse {
    #[serde(default)]
    pub sub_accounts: Vec<SubAccount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubAccount {
    #[serde(default)]
    pub config: Option<SubAccountConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubAccountConfig {
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl SubAccountResponse {
    /// `sub_accounts[0].config.time_zone`
    pub fn time_zone(&self) -> Option<String> {
        self.sub_accounts
            .first()
            .and_then(|account| account.config.as_ref())
            .and_then(|config| config.time_zone.clone())
    }
}

/// `POST author/live_courses/{id}/sessions`
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionsRequest {
    pub sessions: Vec<SessionPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionPayload {
    pub timezone: String,
    pub start_at: String,
    pub end_at: String,
}

impl From<&SessionWindow> for CreateSessionsRequest {
    fn from(window: &SessionWindow) -> Self {
        Self {
            sessions: vec![SessionPayload {
                timezone: window.timezone.clone(),
                start_at: window.start_at_iso(),
                end_at: window.end_at_iso(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<IdOnly>,
}

/// `GET author/users/uid:{uid}`
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<IdOnly>,
}

/// `POST author/live_course_sessions/{id}/registrations`
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub user_id: serde_json::Value,
}
