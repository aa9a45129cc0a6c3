// Settings module
// User-editable configuration, persisted as config.toml

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// What to do with a booked interval whose dates cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidIntervalPolicy {
    /// Drop the interval and log it; its days stay selectable
    #[default]
    Skip,
    /// Treat every date as booked until the data is fixed
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: usize,
    /// IANA zone name used to turn timestamps and "today" into calendar days
    pub timezone: String,
    /// 0 = Sunday, 1 = Monday
    pub first_day_of_week: u8,
    pub show_legend: bool,
    pub invalid_interval_policy: InvalidIntervalPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 20,
            max_retries: 2,
            timezone: "UTC".to_string(),
            first_day_of_week: 0, // Sunday
            show_legend: true,
            invalid_interval_policy: InvalidIntervalPolicy::Skip,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("API base URL must start with http:// or https://".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0 seconds".to_string());
        }

        if self.first_day_of_week > 1 {
            return Err("First day of week must be 0 (Sunday) or 1 (Monday)".to_string());
        }

        if self.timezone.parse::<Tz>().is_err() {
            return Err(format!("Unknown time zone '{}'", self.timezone));
        }

        Ok(())
    }

    /// Configured zone, UTC when the name does not parse
    pub fn time_zone(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            log::warn!("Unknown time zone '{}', using UTC", self.timezone);
            Tz::UTC
        })
    }

    pub fn week_starts_on_monday(&self) -> bool {
        self.first_day_of_week == 1
    }
}
