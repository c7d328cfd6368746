use crate::directory::RoleTables;

/// Default requested STS session duration, in seconds.
pub const DEFAULT_SESSION_DURATION_SECS: i64 = 3600;

/// Service configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requested STS session duration (`STS_TOKEN_TIME_LIMIT`, seconds).
    pub session_duration_secs: i64,
    /// Region written into caller profiles (`AWS_REGION`).
    pub region: String,
    /// DynamoDB tables holding role bindings.
    pub tables: RoleTables,
    /// Model routed by `POST /get-response`.
    pub default_model: String,
    /// Model routed by `POST /get-response/claude-sonnet`.
    pub sonnet_model: String,
    /// Model routed by `POST /get-response/claude-haiku`.
    pub haiku_model: String,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let session_duration_secs = std::env::var("STS_TOKEN_TIME_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSION_DURATION_SECS);

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());

        let tables = RoleTables {
            connected: std::env::var("OPSMATE_CONNECTED_TABLE")
                .unwrap_or_else(|_| "connected-aws-accounts".into()),
            member: std::env::var("OPSMATE_MEMBER_TABLE")
                .unwrap_or_else(|_| "account-factory-test".into()),
        };

        let default_model = std::env::var("OPSMATE_DEFAULT_MODEL")
            .unwrap_or_else(|_| "anthropic.claude-3-5-sonnet-20240620-v1:0".into());
        let sonnet_model = std::env::var("OPSMATE_SONNET_MODEL")
            .unwrap_or_else(|_| "anthropic.claude-3-5-sonnet-20240620-v1:0".into());
        let haiku_model = std::env::var("OPSMATE_HAIKU_MODEL")
            .unwrap_or_else(|_| "anthropic.claude-3-haiku-20240307-v1:0".into());

        let allowed_origins = std::env::var("OPSMATE_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["http://localhost:5173".into()]);

        Config {
            session_duration_secs,
            region,
            tables,
            default_model,
            sonnet_model,
            haiku_model,
            allowed_origins,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            session_duration_secs: DEFAULT_SESSION_DURATION_SECS,
            region: "us-east-1".into(),
            tables: RoleTables {
                connected: "connected-aws-accounts".into(),
                member: "account-factory-test".into(),
            },
            default_model: "anthropic.claude-3-5-sonnet-20240620-v1:0".into(),
            sonnet_model: "anthropic.claude-3-5-sonnet-20240620-v1:0".into(),
            haiku_model: "anthropic.claude-3-haiku-20240307-v1:0".into(),
            allowed_origins: vec!["http://localhost:5173".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_duration_is_one_hour() {
        let config = Config::default();
        assert_eq!(config.session_duration_secs, 3600);
    }

    #[test]
    fn default_region_is_us_east_1() {
        assert_eq!(Config::default().region, "us-east-1");
    }
}
