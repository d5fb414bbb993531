//! Service configuration from environment variables.

use std::env;

use crate::models::time::{self, ReportClock};

/// Paths to the three seed CSV files loaded at startup.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Polling observations CSV (`store_id,status,timestamp_utc`)
    pub status_path: String,
    /// Timezone assignments CSV (`store_id,timezone_str`)
    pub timezone_path: String,
    /// Business hours CSV (`store_id,day,start_time_local,end_time_local`)
    pub hours_path: String,
}

impl SeedConfig {
    /// Create a seed configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `STATUS_PATH` (required): observations CSV path
    /// - `TIMEZONE_PATH` (required): timezone CSV path
    /// - `HOURS_PATH` (required): business hours CSV path
    ///
    /// # Errors
    /// Returns an error if required variables are not set.
    pub fn from_env() -> Result<Self, String> {
        let status_path = env::var("STATUS_PATH")
            .map_err(|_| "STATUS_PATH environment variable not set".to_string())?;
        let timezone_path = env::var("TIMEZONE_PATH")
            .map_err(|_| "TIMEZONE_PATH environment variable not set".to_string())?;
        let hours_path = env::var("HOURS_PATH")
            .map_err(|_| "HOURS_PATH environment variable not set".to_string())?;

        Ok(Self {
            status_path,
            timezone_path,
            hours_path,
        })
    }
}

/// Resolve the report reference clock from the environment.
///
/// # Environment Variables
/// - `REPORT_REFERENCE_TIME` (optional): UTC wall-clock timestamp in the
///   fixed format. When set, report windows trail this pinned instant —
///   the right choice for a static seed dataset. When absent, the live
///   clock is used.
///
/// # Errors
/// Returns an error if the variable is set but malformed.
pub fn report_clock_from_env() -> Result<ReportClock, String> {
    match env::var("REPORT_REFERENCE_TIME") {
        Ok(raw) => {
            let ts = time::parse_timestamp(&raw)
                .map_err(|e| format!("REPORT_REFERENCE_TIME is invalid: {}", e))?;
            Ok(ReportClock::Fixed(ts))
        }
        Err(_) => Ok(ReportClock::Wall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_rejects_malformed_reference_time() {
        std::env::set_var("REPORT_REFERENCE_TIME", "yesterday-ish");
        let result = report_clock_from_env();
        std::env::remove_var("REPORT_REFERENCE_TIME");
        assert!(result.is_err());
    }
}
