use serde::Deserialize;

/// The `application/x-www-form-urlencoded` body Slack posts to the webhook.
/// The interesting part is a JSON document inside the `payload` field.
#[derive(Debug, Deserialize)]
pub struct WebhookForm {
    pub payload: String,
}

/// The JSON document carried in the form's `payload` field.
#[derive(Debug, Deserialize)]
pub struct SlackPayload {
    pub message: SlackMessage,
    pub user: SlackUser,
}

#[derive(Debug, Deserialize)]
pub struct SlackMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SlackUser {
    pub name: String,
}

impl SlackPayload {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Only `message`-type payloads carry a review.
    pub fn is_message(&self) -> bool {
        self.message.kind == "message"
    }

    /// Message text with Slack's literal `*` bold markers stripped.
    pub fn cleaned_text(&self) -> String {
        self.message.text.replace('*', "")
    }
}
