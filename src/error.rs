use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Brawl Stars API error: {status} - {message}")]
    BrawlApi { status: u16, message: String },

    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No profile saved for this user")]
    ProfileNotFound,

    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}

impl AppError {
    /// Message shown to the user when a command fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::BrawlApi { status: 400, .. } => {
                "⚠️ · **Oops! Something went wrong.** It seems there was an issue with the information you provided."
            }
            AppError::BrawlApi { status: 403, .. } => {
                "⚠️ · **Sorry, you don't have access to this feature right now.** It's not your fault; it's a problem with our system."
            }
            AppError::BrawlApi { status: 404, .. } => {
                "⚠️ · **Uh-oh! The tag you entered doesn't seem to exist.** Please double-check and try again."
            }
            AppError::BrawlApi { status: 429, .. } => {
                "⚠️ · **Hold on! We're experiencing high traffic right now.** Too many requests are coming in at once, so please try again later."
            }
            AppError::BrawlApi { status: 503, .. } => {
                "⚠️ · **We're sorry, but we can't access the data you need at the moment.** The game is undergoing maintenance. Please check back later."
            }
            AppError::ProfileNotFound => {
                "⚠️ · No profile saved. Use `/set tag` to save your profile and then try again."
            }
            _ => {
                "**Oops! Something unexpected happened.** Our team is working to fix the issue. Please try again later or contact support for assistance."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_statuses_have_friendly_messages() {
        let not_found = AppError::BrawlApi {
            status: 404,
            message: "notFound".into(),
        };
        assert!(not_found.user_message().contains("doesn't seem to exist"));

        let teapot = AppError::BrawlApi {
            status: 418,
            message: String::new(),
        };
        assert!(teapot.user_message().contains("Something unexpected"));
    }
}
