//! Production probe implementations behind the core probe traits

use readinator_core::{
    AppSettings, CheckError, DatabaseProbe, HttpProbe, HttpResponse, ReadinatorError, Result,
    SettingsSource,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP probe backed by reqwest
pub struct ReqwestHttpProbe {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpProbe {
    /// Build a probe whose requests are bounded by the given timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReadinatorError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpProbe for ReqwestHttpProbe {
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, CheckError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                CheckError::Timeout
            } else {
                CheckError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                CheckError::Timeout
            } else {
                CheckError::Connection(e.to_string())
            }
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// PostgreSQL probe.
///
/// Opens a fresh connection per query so that database checks stay
/// independent of each other.
pub struct PostgresProbe {
    url: String,
    connect_timeout: Duration,
}

impl PostgresProbe {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }

    fn connect(&self) -> std::result::Result<postgres::Client, CheckError> {
        if self.url.is_empty() {
            return Err(CheckError::Configuration(
                "no database URL configured".to_string(),
            ));
        }

        let mut config: postgres::Config = self
            .url
            .parse()
            .map_err(|e| CheckError::Configuration(format!("invalid database URL: {}", e)))?;
        config.connect_timeout(self.connect_timeout);
        config
            .connect(postgres::NoTls)
            .map_err(|e| CheckError::Connection(e.to_string()))
    }
}

impl DatabaseProbe for PostgresProbe {
    fn list_tables(&self) -> std::result::Result<Vec<String>, CheckError> {
        let mut client = self.connect()?;
        let rows = client
            .query(
                "SELECT tablename FROM pg_tables WHERE schemaname = 'public'",
                &[],
            )
            .map_err(|e| CheckError::Connection(format!("query failed: {}", e)))?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    fn count_users(&self, username: &str) -> std::result::Result<i64, CheckError> {
        let mut client = self.connect()?;
        let row = client
            .query_one(
                "SELECT COUNT(*) FROM users WHERE username = $1",
                &[&username],
            )
            .map_err(|e| CheckError::Connection(format!("query failed: {}", e)))?;
        Ok(row.get(0))
    }
}

/// Settings source that parses a `KEY=VALUE` env file
pub struct EnvFileSettings {
    path: PathBuf,
}

impl EnvFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsSource for EnvFileSettings {
    fn load(&self) -> std::result::Result<AppSettings, CheckError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CheckError::Configuration(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let vars = parse_env_file(&content);

        let require = |key: &str| {
            vars.get(key).cloned().ok_or_else(|| {
                CheckError::Configuration(format!("{} not set in {}", key, self.path.display()))
            })
        };

        let debug = vars
            .get("DEBUG")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(AppSettings {
            allowed_origins: parse_origins(&require("ALLOWED_ORIGINS")?),
            jwt_secret_key: require("JWT_SECRET_KEY")?,
            database_url: require("DATABASE_URL")?,
            debug,
        })
    }
}

/// Parse an env file into key/value pairs.
///
/// Skips blank lines and comments; strips an optional `export ` prefix and
/// surrounding quotes.
fn parse_env_file(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let mut value = value.trim();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }
            vars.insert(key.trim().to_string(), value.to_string());
        }
    }

    vars
}

/// Parse an origins value: a JSON array or a comma-separated list
fn parse_origins(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) {
            return items
                .iter()
                .filter_map(|item| item.as_str().map(|s| s.to_string()))
                .collect();
        }
    }
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn env_parser_handles_comments_quotes_and_export() {
        let vars = parse_env_file(
            "# comment\n\
             DEBUG=true\n\
             export DATABASE_URL=\"postgresql://app@localhost/app\"\n\
             JWT_SECRET_KEY='secret'\n\
             \n\
             MALFORMED LINE\n",
        );

        assert_eq!(vars.get("DEBUG").map(String::as_str), Some("true"));
        assert_eq!(
            vars.get("DATABASE_URL").map(String::as_str),
            Some("postgresql://app@localhost/app")
        );
        assert_eq!(vars.get("JWT_SECRET_KEY").map(String::as_str), Some("secret"));
        assert!(!vars.contains_key("MALFORMED LINE"));
    }

    #[test]
    fn origins_accept_comma_list_and_json_array() {
        assert_eq!(
            parse_origins("http://localhost:5500, http://127.0.0.1:5500"),
            vec!["http://localhost:5500", "http://127.0.0.1:5500"]
        );
        assert_eq!(
            parse_origins(r#"["http://localhost:5500"]"#),
            vec!["http://localhost:5500"]
        );
    }

    #[test]
    fn env_file_settings_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "ALLOWED_ORIGINS=http://localhost:5500\n\
             JWT_SECRET_KEY=0123456789abcdef0123456789abcdef\n\
             DATABASE_URL=postgresql://app@localhost/app\n\
             DEBUG=false\n",
        )
        .unwrap();

        let settings = EnvFileSettings::new(path).load().unwrap();
        assert_eq!(settings.allowed_origins, vec!["http://localhost:5500"]);
        assert!(!settings.debug);
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "DEBUG=false\n").unwrap();

        let err = EnvFileSettings::new(path).load().unwrap_err();
        assert!(matches!(err, CheckError::Configuration(_)));
        assert!(err.to_string().contains("ALLOWED_ORIGINS"));
    }

    #[test]
    fn missing_env_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnvFileSettings::new(dir.path().join(".env"))
            .load()
            .unwrap_err();
        assert!(matches!(err, CheckError::Configuration(_)));
    }

    #[test]
    fn empty_database_url_refuses_to_connect() {
        let probe = PostgresProbe::new("", Duration::from_secs(1));
        assert!(matches!(
            probe.list_tables().unwrap_err(),
            CheckError::Configuration(_)
        ));
    }
}
