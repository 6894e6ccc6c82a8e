//! HTTP checks: backend health, endpoint availability, CORS, security headers
//!
//! All checks issue independent GET requests through an injected
//! [`HttpProbe`]; nothing is shared between checks beyond read-only
//! configuration.

use readinator_core::{
    CheckCategory, CheckDefinition, CheckError, CheckRegistry, Config, HttpProbe, ReadinatorError,
    RunnableCheck, Severity,
};
use std::sync::Arc;

/// Origin with the scheme stripped, for matching against header values
pub(crate) fn origin_authority(origin: &str) -> &str {
    origin
        .trim_start_matches("https://")
        .trim_start_matches("http://")
}

/// Whether an `Access-Control-Allow-Origin` value admits the given origin
pub(crate) fn origin_allowed(header_value: &str, origin: &str) -> bool {
    header_value == "*" || header_value.contains(origin_authority(origin))
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// GET /health must return 200 with a JSON body reporting `"healthy"`
pub struct HealthCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
}

impl HealthCheck {
    pub fn new(config: &Config, http: Arc<dyn HttpProbe>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "http-health",
                "Backend is running and healthy",
                CheckCategory::Connectivity,
                Severity::Critical,
            )
            .with_remediation("Start the backend server, then re-run the verification"),
            http,
            url: config.target.url("/health"),
        }
    }
}

impl RunnableCheck for HealthCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[])?;
        if response.status != 200 {
            return Err(CheckError::Assertion(format!(
                "health endpoint returned HTTP {}",
                response.status
            )));
        }

        let body = response.json()?;
        match body.get("status").and_then(|v| v.as_str()) {
            Some("healthy") => Ok("backend reports healthy".to_string()),
            _ => Err(CheckError::Assertion(format!(
                "unexpected health payload: {}",
                response.body
            ))),
        }
    }
}

/// A fixed path must answer with HTTP 200
pub struct EndpointCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
    count_items: bool,
}

impl EndpointCheck {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        url: String,
        count_items: bool,
        http: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            definition: CheckDefinition::new(
                id,
                description,
                CheckCategory::ApiEndpoints,
                Severity::Critical,
            ),
            http,
            url,
            count_items,
        }
    }
}

impl RunnableCheck for EndpointCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[])?;
        if response.status != 200 {
            return Err(CheckError::Assertion(format!(
                "returned HTTP {}",
                response.status
            )));
        }

        if self.count_items {
            if let Ok(serde_json::Value::Array(items)) = response.json() {
                return Ok(format!("responding ({} items)", items.len()));
            }
        }
        Ok("responding (HTTP 200)".to_string())
    }
}

/// CORS must admit the configured frontend origin
pub struct CorsOriginCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
    origin: String,
}

impl CorsOriginCheck {
    pub fn new(config: &Config, http: Arc<dyn HttpProbe>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "cors-allow-origin",
                "CORS admits the frontend origin",
                CheckCategory::Cors,
                Severity::Critical,
            )
            .with_remediation("Update ALLOWED_ORIGINS in the backend env file"),
            http,
            url: config.target.api_url("/events"),
            origin: config.target.frontend_origin.clone(),
        }
    }
}

impl RunnableCheck for CorsOriginCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[("Origin", &self.origin)])?;
        match response.header("Access-Control-Allow-Origin") {
            Some(value) if origin_allowed(value, &self.origin) => {
                Ok(format!("allowed origin: {}", value))
            }
            Some(value) => Err(CheckError::Assertion(format!(
                "CORS allows {}, but the frontend is served from {}",
                value, self.origin
            ))),
            None => Err(CheckError::MissingResource(
                "no Access-Control-Allow-Origin header in response".to_string(),
            )),
        }
    }
}

/// CORS should allow credentials
pub struct CorsCredentialsCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
    origin: String,
}

impl CorsCredentialsCheck {
    pub fn new(config: &Config, http: Arc<dyn HttpProbe>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "cors-allow-credentials",
                "CORS allows credentials",
                CheckCategory::Cors,
                Severity::Advisory,
            ),
            http,
            url: config.target.api_url("/events"),
            origin: config.target.frontend_origin.clone(),
        }
    }
}

impl RunnableCheck for CorsCredentialsCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[("Origin", &self.origin)])?;
        match response.header("Access-Control-Allow-Credentials") {
            Some("true") => Ok("credentials allowed".to_string()),
            _ => Err(CheckError::Assertion(
                "CORS might not allow credentials".to_string(),
            )),
        }
    }
}

/// A single required security header must be present on the root response
pub struct SecurityHeaderCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
    header: String,
}

impl SecurityHeaderCheck {
    pub fn new(header: impl Into<String>, url: String, http: Arc<dyn HttpProbe>) -> Self {
        let header = header.into();
        Self {
            definition: CheckDefinition::new(
                format!("header-{}", header.to_lowercase()),
                format!("{} header present", header),
                CheckCategory::SecurityHeaders,
                Severity::Critical,
            ),
            http,
            url,
            header,
        }
    }
}

impl RunnableCheck for SecurityHeaderCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[])?;
        match response.header(&self.header) {
            Some(value) => Ok(format!("{}: {}", self.header, truncate(value, 50))),
            None => Err(CheckError::MissingResource(format!(
                "{} header missing",
                self.header
            ))),
        }
    }
}

/// The Content-Security-Policy should admit the configured CDN hosts
pub struct CspCdnCheck {
    definition: CheckDefinition,
    http: Arc<dyn HttpProbe>,
    url: String,
    cdn_hosts: Vec<String>,
}

impl CspCdnCheck {
    pub fn new(config: &Config, http: Arc<dyn HttpProbe>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "header-csp-cdn",
                "CSP allows configured CDN hosts",
                CheckCategory::SecurityHeaders,
                Severity::Advisory,
            ),
            http,
            url: config.target.url("/"),
            cdn_hosts: config.target.cdn_hosts.clone(),
        }
    }
}

impl RunnableCheck for CspCdnCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let response = self.http.get(&self.url, &[])?;
        let csp = response
            .header("Content-Security-Policy")
            .ok_or_else(|| {
                CheckError::MissingResource("Content-Security-Policy header missing".to_string())
            })?;

        let blocked: Vec<&str> = self
            .cdn_hosts
            .iter()
            .filter(|host| !csp.contains(host.as_str()))
            .map(|host| host.as_str())
            .collect();

        if blocked.is_empty() {
            Ok("CSP allows configured CDN hosts".to_string())
        } else {
            Err(CheckError::Assertion(format!(
                "CSP may block CDN resources: {}",
                blocked.join(", ")
            )))
        }
    }
}

/// Register the health check
pub fn register_health_check(
    registry: &mut CheckRegistry,
    config: &Config,
    http: Arc<dyn HttpProbe>,
) -> Result<(), ReadinatorError> {
    registry.register(Box::new(HealthCheck::new(config, http)))
}

/// Register an endpoint availability check
pub fn register_endpoint_check(
    registry: &mut CheckRegistry,
    http: Arc<dyn HttpProbe>,
    id: &str,
    description: &str,
    url: String,
    count_items: bool,
) -> Result<(), ReadinatorError> {
    registry.register(Box::new(EndpointCheck::new(
        id,
        description,
        url,
        count_items,
        http,
    )))
}

/// Register CORS checks; the credentials check is advisory and optional
pub fn register_cors_checks(
    registry: &mut CheckRegistry,
    config: &Config,
    http: Arc<dyn HttpProbe>,
    include_credentials: bool,
) -> Result<(), ReadinatorError> {
    registry.register(Box::new(CorsOriginCheck::new(config, http.clone())))?;
    if include_credentials {
        registry.register(Box::new(CorsCredentialsCheck::new(config, http)))?;
    }
    Ok(())
}

/// Register one check per configured security header, plus the CSP/CDN check
pub fn register_security_header_checks(
    registry: &mut CheckRegistry,
    config: &Config,
    http: Arc<dyn HttpProbe>,
) -> Result<(), ReadinatorError> {
    let url = config.target.url("/");
    for header in &config.target.security_headers {
        registry.register(Box::new(SecurityHeaderCheck::new(
            header.clone(),
            url.clone(),
            http.clone(),
        )))?;
    }
    registry.register(Box::new(CspCdnCheck::new(config, http)))
}
