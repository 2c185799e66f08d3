use std::time::Duration;

use crate::config::NotifyConfig;

/// Advisory push channel. Deliveries are fire-and-forget: a failed
/// notification is logged to stderr and never fails the job that sent it.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Used when the channel is not configured.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}

/// Pushover client over the messages endpoint.
pub struct PushNotifier {
    client: reqwest::blocking::Client,
    api_base: String,
    token: String,
    user_key: String,
}

impl PushNotifier {
    pub fn new(api_base: &str, token: &str, user_key: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            user_key: user_key.to_string(),
        }
    }

    fn send(&self, message: &str) -> Result<(), reqwest::Error> {
        let url = format!("{}/1/messages.json", self.api_base);
        let params = [
            ("token", self.token.as_str()),
            ("user", self.user_key.as_str()),
            ("title", "setsync"),
            ("message", message),
        ];

        self.client
            .post(url)
            .form(&params)
            .send()?
            .error_for_status()?;

        Ok(())
    }
}

impl Notifier for PushNotifier {
    fn notify(&self, message: &str) {
        if let Err(e) = self.send(message) {
            eprintln!("notification failed: {}", e);
        }
    }
}

/// Build the configured channel, or a no-op when credentials are missing.
pub fn notifier_from_config(config: &NotifyConfig) -> Box<dyn Notifier> {
    match (&config.token, &config.user_key) {
        (Some(token), Some(user_key)) => {
            Box::new(PushNotifier::new(&config.api_base, token, user_key))
        }
        _ => Box::new(NoopNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_channel_is_a_noop() {
        let config = NotifyConfig::default();
        let notifier = notifier_from_config(&config);
        notifier.notify("nobody hears this");
    }

    #[test]
    fn partial_credentials_fall_back_to_noop() {
        let config = NotifyConfig {
            token: Some("t".to_string()),
            ..Default::default()
        };
        let notifier = notifier_from_config(&config);
        notifier.notify("still nobody");
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let notifier = PushNotifier::new("https://example.test/", "t", "u");
        assert_eq!(notifier.api_base, "https://example.test");
    }
}
