//! Slack implementation of the roster and notifier seams
//!
//! Members come from the configured channel minus deactivated accounts, bots
//! and anyone whose status emoji is in the skip list. Announcements are posted
//! to the configured hook.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{Notifier, RosterProvider};
use crate::domain::{Match, Member};
use crate::error::{CoffeeError, Result};

/// Slack Web API base URL
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// Username shown on announcements
const BOT_USERNAME: &str = "coffeeconnection";

/// Icon shown on announcements
const BOT_ICON: &str = ":coffee:";

/// Page size for cursor-paginated API calls
const PAGE_LIMIT: &str = "200";

/// Configuration for the Slack client
#[derive(Clone)]
pub struct SlackConfig {
    pub token: String,
    pub hook: String,
    pub channel: String,
    pub skip_emoji: Vec<String>,
    pub api_base: String,
    pub timeout: Duration,
}

impl SlackConfig {
    pub fn new(token: impl Into<String>, hook: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            hook: hook.into(),
            channel: channel.into(),
            skip_emoji: Vec::new(),
            api_base: SLACK_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_skip_emoji(mut self, skip_emoji: Vec<String>) -> Self {
        self.skip_emoji = skip_emoji;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

// Keep the token out of logs
impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("hook", &self.hook)
            .field("channel", &self.channel)
            .field("skip_emoji", &self.skip_emoji)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// A workspace user as returned by `users.list`
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub profile: SlackProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackProfile {
    #[serde(default)]
    pub status_emoji: String,
}

impl SlackUser {
    /// Deactivated, a bot, or wearing one of the skip emoji.
    pub fn is_unavailable(&self, skip_emoji: &[String]) -> bool {
        self.deleted || self.is_bot || skip_emoji.iter().any(|e| *e == self.profile.status_emoji)
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Page<T> {
    #[serde(default)]
    members: Vec<T>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

/// Channel members that are not unavailable, in channel order.
pub fn available_members(users: &[SlackUser], channel_members: &[String], skip_emoji: &[String]) -> Vec<Member> {
    let unavailable: Vec<&str> = users
        .iter()
        .filter(|u| u.is_unavailable(skip_emoji))
        .map(|u| u.id.as_str())
        .collect();

    channel_members
        .iter()
        .filter(|id| {
            let available = !unavailable.contains(&id.as_str());
            if !available {
                log::info!("{} is not available", id);
            }
            available
        })
        .map(|id| Member::new(id.as_str()))
        .collect()
}

/// JSON body posted for an announcement.
pub fn message_payload(channel: &str, text: &str) -> Value {
    json!({
        "username": BOT_USERNAME,
        "icon_emoji": BOT_ICON,
        "channel": channel,
        "text": text,
    })
}

/// Slack API client
pub struct SlackClient {
    client: Client,
    config: SlackConfig,
}

impl SlackClient {
    /// Create a client with the given configuration
    pub fn new(config: SlackConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(CoffeeError::Config("Slack token is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoffeeError::Slack(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Post a message to the hook
    pub async fn say(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.config.hook)
            .bearer_auth(&self.config.token)
            .json(&message_payload(&self.config.channel, text))
            .send()
            .await
            .map_err(|e| CoffeeError::Slack(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoffeeError::Slack(format!("Hook error {}: {}", status, error_body)));
        }
        Ok(())
    }

    /// Call a Web API method and fail on `"ok": false`
    async fn api_get<T: DeserializeOwned>(&self, method: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), method);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .query(query)
            .send()
            .await
            .map_err(|e| CoffeeError::Slack(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoffeeError::Slack(format!("API error {}: {}", status, error_body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CoffeeError::Slack(format!("Failed to parse response: {}", e)))?;

        if !body["ok"].as_bool().unwrap_or(false) {
            let error = body["error"].as_str().unwrap_or("unknown error");
            return Err(CoffeeError::Slack(format!("{} failed: {}", method, error)));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Follow `next_cursor` until every page of `members` is collected
    async fn all_members<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<Vec<T>> {
        let mut members = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut query = params.to_vec();
            query.push(("limit", PAGE_LIMIT));
            if !cursor.is_empty() {
                query.push(("cursor", cursor.as_str()));
            }

            let page: Page<T> = self.api_get(method, &query).await?;
            members.extend(page.members);

            if page.response_metadata.next_cursor.is_empty() {
                break;
            }
            cursor = page.response_metadata.next_cursor;
        }

        Ok(members)
    }

    pub async fn users(&self) -> Result<Vec<SlackUser>> {
        self.all_members("users.list", &[]).await
    }

    pub async fn channel_members(&self) -> Result<Vec<String>> {
        self.all_members("conversations.members", &[("channel", self.config.channel.as_str())])
            .await
    }
}

#[async_trait]
impl RosterProvider for SlackClient {
    async fn list_eligible_members(&self) -> Result<Vec<Member>> {
        let users = self.users().await?;
        let channel_members = self.channel_members().await?;
        Ok(available_members(&users, &channel_members, &self.config.skip_emoji))
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn announce(&self, pair: &Match, text: &str) -> Result<()> {
        log::info!("Announcing {}", pair);
        self.say(text).await
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("channel", &self.config.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn user(id: &str) -> SlackUser {
        SlackUser {
            id: id.to_string(),
            deleted: false,
            is_bot: false,
            profile: SlackProfile::default(),
        }
    }

    fn ids(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.as_str()).collect()
    }

    /// Serve canned JSON bodies; the first key contained in the request line wins.
    async fn fake_slack(routes: Vec<(&'static str, Value)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let request = String::from_utf8_lossy(&request).to_string();
                let line = request.lines().next().unwrap_or_default().to_string();

                let body = routes
                    .iter()
                    .find(|(key, _)| line.contains(key))
                    .map(|(_, body)| body.to_string())
                    .unwrap_or_else(|| json!({"ok": false, "error": "unknown_method"}).to_string());

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_unavailable_users() {
        let skip = vec![":palm_tree:".to_string()];

        assert!(!user("U1").is_unavailable(&skip));

        let mut deleted = user("U2");
        deleted.deleted = true;
        assert!(deleted.is_unavailable(&skip));

        let mut bot = user("U3");
        bot.is_bot = true;
        assert!(bot.is_unavailable(&skip));

        let mut away = user("U4");
        away.profile.status_emoji = ":palm_tree:".to_string();
        assert!(away.is_unavailable(&skip));
    }

    #[test]
    fn test_available_members_keeps_channel_order() {
        let mut bot = user("U2");
        bot.is_bot = true;
        let users = vec![user("U1"), bot, user("U3")];
        let channel = vec!["U3".to_string(), "U2".to_string(), "U1".to_string(), "U9".to_string()];

        let members = available_members(&users, &channel, &[]);
        assert_eq!(ids(&members), vec!["U3", "U1", "U9"]);
    }

    #[test]
    fn test_message_payload() {
        let payload = message_payload("C1", "hello");
        assert_eq!(payload["channel"], "C1");
        assert_eq!(payload["text"], "hello");
        assert_eq!(payload["username"], "coffeeconnection");
        assert_eq!(payload["icon_emoji"], ":coffee:");
    }

    #[test]
    fn test_user_deserialization_defaults() {
        let user: SlackUser = serde_json::from_value(json!({"id": "U1"})).unwrap();
        assert!(!user.deleted);
        assert!(!user.is_bot);
        assert_eq!(user.profile.status_emoji, "");
    }

    #[test]
    fn test_client_requires_token() {
        let result = SlackClient::new(SlackConfig::new("", "https://hooks.example/x", "C1"));
        assert!(matches!(result, Err(CoffeeError::Config(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = SlackConfig::new("xoxb-secret", "https://hooks.example/x", "C1");
        assert!(!format!("{:?}", config).contains("xoxb-secret"));
    }

    #[tokio::test]
    async fn test_roster_follows_pagination() {
        let base = fake_slack(vec![
            (
                "users.list?limit=200&cursor=next1",
                json!({"ok": true, "members": [{"id": "U3", "is_bot": true}]}),
            ),
            (
                "users.list",
                json!({
                    "ok": true,
                    "members": [{"id": "U1"}, {"id": "U2", "profile": {"status_emoji": ":palm_tree:"}}],
                    "response_metadata": {"next_cursor": "next1"}
                }),
            ),
            (
                "conversations.members",
                json!({"ok": true, "members": ["U1", "U2", "U3", "U4"]}),
            ),
        ])
        .await;

        let config = SlackConfig::new("xoxb-test", format!("{}/hook", base), "C1")
            .with_skip_emoji(vec![":palm_tree:".to_string()])
            .with_api_base(base);
        let client = SlackClient::new(config).unwrap();

        let members = client.list_eligible_members().await.unwrap();
        assert_eq!(ids(&members), vec!["U1", "U4"]);
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let base = fake_slack(vec![("users.list", json!({"ok": false, "error": "invalid_auth"}))]).await;
        let client = SlackClient::new(SlackConfig::new("xoxb-test", "unused", "C1").with_api_base(base)).unwrap();

        let err = client.list_eligible_members().await.unwrap_err();
        assert!(err.to_string().contains("invalid_auth"));
    }
}
