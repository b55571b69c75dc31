// Member onboarding: the public welcome message and the private join DM.
//
// Both are admin-authored templates. `{user}` in a template is replaced with
// the new member's mention when it is sent.

use crate::core::errors::CommandError;
use crate::core::store::{ConfigStore, StoreError};
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the new member's mention.
pub const USER_PLACEHOLDER: &str = "{user}";

/// Where and what to post when someone joins. The channel id is never zero;
/// entries on disk with a zero channel fail to deserialize and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWelcomeConfig")]
pub struct WelcomeConfig {
    pub channel: u64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct RawWelcomeConfig {
    channel: u64,
    message: String,
}

impl TryFrom<RawWelcomeConfig> for WelcomeConfig {
    type Error = String;

    fn try_from(raw: RawWelcomeConfig) -> Result<Self, Self::Error> {
        if raw.channel == 0 {
            return Err("welcome channel id cannot be 0".to_string());
        }
        Ok(Self {
            channel: raw.channel,
            message: raw.message,
        })
    }
}

/// A rendered welcome message ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomePost {
    pub channel_id: u64,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Channel id cannot be 0")]
    InvalidChannel,
}

impl From<OnboardingError> for CommandError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::Storage(e) => e.into(),
            OnboardingError::EmptyMessage | OnboardingError::InvalidChannel => {
                CommandError::validation(err.to_string())
            }
        }
    }
}

pub fn render_template(template: &str, mention: &str) -> String {
    template.replace(USER_PLACEHOLDER, mention)
}

pub struct OnboardingService<W, D>
where
    W: ConfigStore<WelcomeConfig>,
    D: ConfigStore<String>,
{
    welcome: W,
    join_dm: D,
}

impl<W, D> OnboardingService<W, D>
where
    W: ConfigStore<WelcomeConfig>,
    D: ConfigStore<String>,
{
    pub fn new(welcome: W, join_dm: D) -> Self {
        Self { welcome, join_dm }
    }

    pub async fn set_welcome(
        &self,
        guild_id: u64,
        channel_id: u64,
        message: &str,
    ) -> Result<(), OnboardingError> {
        if channel_id == 0 {
            return Err(OnboardingError::InvalidChannel);
        }
        if message.trim().is_empty() {
            return Err(OnboardingError::EmptyMessage);
        }
        let config = WelcomeConfig {
            channel: channel_id,
            message: message.to_string(),
        };
        self.welcome.put(guild_id, config).await?;
        Ok(())
    }

    pub async fn set_join_dm(&self, guild_id: u64, message: &str) -> Result<(), OnboardingError> {
        if message.trim().is_empty() {
            return Err(OnboardingError::EmptyMessage);
        }
        self.join_dm.put(guild_id, message.to_string()).await?;
        Ok(())
    }

    /// The welcome post for a new member, if the guild configured one.
    pub async fn welcome_for(
        &self,
        guild_id: u64,
        mention: &str,
    ) -> Result<Option<WelcomePost>, OnboardingError> {
        Ok(self
            .welcome
            .get(guild_id)
            .await?
            .map(|config| WelcomePost {
                channel_id: config.channel,
                content: render_template(&config.message, mention),
            }))
    }

    /// The join DM for a new member, if the guild configured one.
    pub async fn join_dm_for(
        &self,
        guild_id: u64,
        mention: &str,
    ) -> Result<Option<String>, OnboardingError> {
        Ok(self
            .join_dm
            .get(guild_id)
            .await?
            .map(|template| render_template(&template, mention)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::InMemoryConfigStore;

    fn make_service(
    ) -> OnboardingService<InMemoryConfigStore<WelcomeConfig>, InMemoryConfigStore<String>> {
        OnboardingService::new(InMemoryConfigStore::new(), InMemoryConfigStore::new())
    }

    #[test]
    fn placeholder_is_replaced_everywhere() {
        assert_eq!(
            render_template("Welcome {user}! Enjoy, {user}.", "<@5>"),
            "Welcome <@5>! Enjoy, <@5>."
        );
        assert_eq!(render_template("Hello all", "<@5>"), "Hello all");
    }

    #[tokio::test]
    async fn welcome_is_rendered_for_configured_guilds_only() {
        let service = make_service();
        service
            .set_welcome(1, 99, "Welcome {user} to the server")
            .await
            .unwrap();

        let post = service.welcome_for(1, "<@5>").await.unwrap();
        assert_eq!(
            post,
            Some(WelcomePost {
                channel_id: 99,
                content: "Welcome <@5> to the server".to_string(),
            })
        );
        assert!(service.welcome_for(2, "<@5>").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn join_dm_is_rendered() {
        let service = make_service();
        service.set_join_dm(1, "Hi {user}, read the rules!").await.unwrap();

        let dm = service.join_dm_for(1, "<@5>").await.unwrap();
        assert_eq!(dm.as_deref(), Some("Hi <@5>, read the rules!"));
        assert!(service.join_dm_for(2, "<@5>").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_templates_are_rejected() {
        let service = make_service();
        assert!(matches!(
            service.set_welcome(1, 99, "  ").await,
            Err(OnboardingError::EmptyMessage)
        ));
        assert!(matches!(
            service.set_join_dm(1, "").await,
            Err(OnboardingError::EmptyMessage)
        ));
    }

    #[tokio::test]
    async fn zero_channel_is_rejected() {
        let service = make_service();
        assert!(matches!(
            service.set_welcome(1, 0, "Welcome {user}").await,
            Err(OnboardingError::InvalidChannel)
        ));
        assert!(service.welcome_for(1, "<@5>").await.unwrap().is_none());
    }

    #[test]
    fn zero_channel_fails_to_deserialize() {
        let ok: WelcomeConfig =
            serde_json::from_str(r#"{"channel": 99, "message": "Hi {user}"}"#).unwrap();
        assert_eq!(ok.channel, 99);

        let zero = serde_json::from_str::<WelcomeConfig>(r#"{"channel": 0, "message": "Hi"}"#);
        assert!(zero.is_err());
    }
}
