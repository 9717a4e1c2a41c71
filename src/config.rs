use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CONVERSATIONS_PATH: &str = "/conversations";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong!";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawerConfig {
    /// Origin the delete endpoint lives under.
    pub api_base_url: String,
    /// Route of the "no conversation selected" view.
    pub conversations_path: String,
    /// Message shown when a delete fails.
    pub failure_message: String,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            conversations_path: DEFAULT_CONVERSATIONS_PATH.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl DrawerConfig {
    pub fn delete_url(&self, conversation_id: &str) -> String {
        format!(
            "{}/api/conversations/{}",
            self.api_base_url.trim_end_matches('/'),
            urlencoding::encode(conversation_id)
        )
    }
}
