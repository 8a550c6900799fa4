use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocialMedia {
    pub id: i64,
    /// One of the SocialPlatform tokens; stored as text.
    pub platform: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i64>,
}

/// Supported social link platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    X,
    Bluesky,
    Github,
    Instagram,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::X,
        SocialPlatform::Bluesky,
        SocialPlatform::Github,
        SocialPlatform::Instagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::X => "x",
            SocialPlatform::Bluesky => "bluesky",
            SocialPlatform::Github => "github",
            SocialPlatform::Instagram => "instagram",
        }
    }
}

impl FromStr for SocialPlatform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(SocialPlatform::X),
            "bluesky" => Ok(SocialPlatform::Bluesky),
            "github" => Ok(SocialPlatform::Github),
            "instagram" => Ok(SocialPlatform::Instagram),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_text() {
        for platform in SocialPlatform::ALL {
            assert_eq!(platform.as_str().parse::<SocialPlatform>(), Ok(platform));
        }
        assert!("myspace".parse::<SocialPlatform>().is_err());
    }
}
