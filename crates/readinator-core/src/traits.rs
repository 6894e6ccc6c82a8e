//! Core traits that define the readiness check abstraction layer.
//!
//! All check modules implement these traits for consistent orchestration,
//! and the I/O boundaries (HTTP, database, application settings) are
//! expressed as probe traits so tests can substitute fakes.

use crate::config::AppSettings;
use crate::error::CheckError;
use crate::report::CheckResult;
use serde::{Deserialize, Serialize};

/// How a check's failure is classified.
///
/// A failing Critical check blocks deployment (outcome Fail); a failing
/// Advisory check is informational only (outcome Warn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Advisory,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Advisory => write!(f, "advisory"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Category of readiness check, used to group output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    /// Required files on disk
    FileStructure,
    /// The verified application's settings
    BackendConfig,
    /// Reachability and health of the backend
    Connectivity,
    /// Individual API endpoint availability
    ApiEndpoints,
    /// Cross-origin resource sharing
    Cors,
    /// HTTP security headers
    SecurityHeaders,
    /// Database schema and seed data
    Database,
    /// Frontend entry-point configuration
    Frontend,
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckCategory::FileStructure => write!(f, "file structure"),
            CheckCategory::BackendConfig => write!(f, "backend configuration"),
            CheckCategory::Connectivity => write!(f, "connectivity"),
            CheckCategory::ApiEndpoints => write!(f, "api endpoints"),
            CheckCategory::Cors => write!(f, "cors"),
            CheckCategory::SecurityHeaders => write!(f, "security headers"),
            CheckCategory::Database => write!(f, "database"),
            CheckCategory::Frontend => write!(f, "frontend"),
        }
    }
}

impl std::str::FromStr for CheckCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "file_structure" | "files" => Ok(CheckCategory::FileStructure),
            "backend_config" | "config" => Ok(CheckCategory::BackendConfig),
            "connectivity" => Ok(CheckCategory::Connectivity),
            "api_endpoints" | "endpoints" => Ok(CheckCategory::ApiEndpoints),
            "cors" => Ok(CheckCategory::Cors),
            "security_headers" | "headers" => Ok(CheckCategory::SecurityHeaders),
            "database" | "db" => Ok(CheckCategory::Database),
            "frontend" => Ok(CheckCategory::Frontend),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Definition of a readiness check
#[derive(Debug, Clone)]
pub struct CheckDefinition {
    /// Unique check id within a run
    pub id: String,
    /// Human-readable description of the condition being verified
    pub description: String,
    /// Category
    pub category: CheckCategory,
    /// Classification of a failure
    pub severity: Severity,
    /// Remediation guidance shown when the check does not pass
    pub remediation: Option<String>,
}

impl CheckDefinition {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: CheckCategory,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category,
            severity,
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }
}

/// A single runnable readiness check.
///
/// `execute` returns the pass message on success; any `CheckError` is
/// downgraded by the runner to Fail (Critical) or Warn (Advisory).
pub trait RunnableCheck: Send + Sync {
    /// Get the check definition
    fn definition(&self) -> &CheckDefinition;

    /// Execute the check
    fn execute(&self) -> std::result::Result<String, CheckError>;
}

/// Response captured by an [`HttpProbe`]
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers as received
    pub headers: Vec<(String, String)>,
    /// Response body decoded as text
    pub body: String,
}

impl HttpResponse {
    /// Look up a header value, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON
    pub fn json(&self) -> std::result::Result<serde_json::Value, CheckError> {
        serde_json::from_str(&self.body)
            .map_err(|e| CheckError::Assertion(format!("response body is not JSON: {}", e)))
    }
}

/// Blocking HTTP GET boundary for connectivity checks
pub trait HttpProbe: Send + Sync {
    /// Issue a GET request with optional extra headers
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, CheckError>;
}

/// Database boundary for schema and seed-data checks
pub trait DatabaseProbe: Send + Sync {
    /// List table names in the public schema
    fn list_tables(&self) -> std::result::Result<Vec<String>, CheckError>;

    /// Count rows in the users table matching the given username
    fn count_users(&self, username: &str) -> std::result::Result<i64, CheckError>;
}

/// Source of the verified application's settings
pub trait SettingsSource: Send + Sync {
    /// Load and validate the settings object
    fn load(&self) -> std::result::Result<AppSettings, CheckError>;
}

/// Progress reporting abstraction for UI/CLI
pub trait ProgressReporter: Send + Sync {
    /// Called before a check executes
    fn check_started(&self, definition: &CheckDefinition);

    /// Called once a check's result is available
    fn check_completed(&self, result: &CheckResult);
}

/// No-op progress reporter for silent operation
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn check_started(&self, _definition: &CheckDefinition) {}
    fn check_completed(&self, _result: &CheckResult) {}
}
