//! Readiness checks for readinator
//!
//! Provides the concrete check implementations (connectivity, filesystem,
//! application settings, database) and the production probes they run
//! against, plus builders for the two standard suites.
//!
//! # Example
//!
//! ```no_run
//! use readinator_checks::{connectivity_suite, probes::ReqwestHttpProbe};
//! use readinator_core::Config;
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let http = Arc::new(ReqwestHttpProbe::new(config.target.timeout()).unwrap());
//! let registry = connectivity_suite(&config, http).unwrap();
//! println!("Loaded {} checks", registry.len());
//! ```

pub mod connectivity;
pub mod database;
pub mod files;
pub mod probes;
pub mod settings;

use readinator_core::{CheckRegistry, Config, DatabaseProbe, HttpProbe, Result, SettingsSource};
use std::sync::Arc;

/// Build the connectivity smoke-test suite: health, CORS, API endpoints,
/// security headers, API docs.
pub fn connectivity_suite(config: &Config, http: Arc<dyn HttpProbe>) -> Result<CheckRegistry> {
    let mut registry = CheckRegistry::new();

    connectivity::register_health_check(&mut registry, config, http.clone())?;
    connectivity::register_cors_checks(&mut registry, config, http.clone(), false)?;
    connectivity::register_endpoint_check(
        &mut registry,
        http.clone(),
        "endpoint-api-events",
        "Events API (/api/events)",
        config.target.api_url("/events"),
        true,
    )?;
    connectivity::register_endpoint_check(
        &mut registry,
        http.clone(),
        "endpoint-api-resources",
        "Resources API (/api/resources)",
        config.target.api_url("/resources"),
        true,
    )?;
    connectivity::register_security_header_checks(&mut registry, config, http.clone())?;
    connectivity::register_endpoint_check(
        &mut registry,
        http,
        "endpoint-docs",
        "API documentation (/docs)",
        config.target.url("/docs"),
        false,
    )?;

    Ok(registry)
}

/// Build the full pre-deployment suite.
///
/// Check order follows the deployment checklist: files, backend
/// configuration, connectivity, endpoints, CORS, security headers,
/// database, frontend.
pub fn deployment_suite(
    config: &Config,
    http: Arc<dyn HttpProbe>,
    database: Arc<dyn DatabaseProbe>,
    settings_source: Arc<dyn SettingsSource>,
) -> Result<CheckRegistry> {
    let mut registry = CheckRegistry::new();

    files::register_file_checks(&mut registry, &config.files)?;
    settings::register_settings_checks(&mut registry, config, settings_source)?;
    connectivity::register_health_check(&mut registry, config, http.clone())?;

    let endpoints = [
        ("endpoint-root", "Root endpoint (/)", config.target.url("/"), false),
        (
            "endpoint-health",
            "Health check (/health)",
            config.target.url("/health"),
            false,
        ),
        (
            "endpoint-docs",
            "API documentation (/docs)",
            config.target.url("/docs"),
            false,
        ),
        (
            "endpoint-api-events",
            "Events API (/api/events)",
            config.target.api_url("/events"),
            true,
        ),
        (
            "endpoint-api-resources",
            "Resources API (/api/resources)",
            config.target.api_url("/resources"),
            true,
        ),
    ];
    for (id, description, url, count_items) in endpoints {
        connectivity::register_endpoint_check(
            &mut registry,
            http.clone(),
            id,
            description,
            url,
            count_items,
        )?;
    }

    connectivity::register_cors_checks(&mut registry, config, http.clone(), true)?;
    connectivity::register_security_header_checks(&mut registry, config, http)?;
    database::register_database_checks(&mut registry, &config.database, database)?;
    files::register_frontend_checks(&mut registry, config)?;

    Ok(registry)
}


#[cfg(test)]
mod tests {
    use super::testutil::{FakeDatabaseProbe, FakeHttpProbe, StaticSettings};
    use super::*;
    use readinator_core::AppSettings;

    #[test]
    fn connectivity_suite_registers_expected_checks() {
        let config = Config::default();
        let registry = connectivity_suite(&config, Arc::new(FakeHttpProbe::new())).unwrap();

        assert!(registry.find("http-health").is_some());
        assert!(registry.find("cors-allow-origin").is_some());
        assert!(registry.find("cors-allow-credentials").is_none());
        assert!(registry.find("endpoint-api-events").is_some());
        assert!(registry.find("header-strict-transport-security").is_some());
        assert!(registry.find("endpoint-docs").is_some());
    }

    #[test]
    fn deployment_suite_ids_are_unique() {
        let config = Config::default();
        let registry = deployment_suite(
            &config,
            Arc::new(FakeHttpProbe::new()),
            Arc::new(FakeDatabaseProbe {
                tables: Vec::new(),
                user_count: 0,
                reachable: false,
            }),
            Arc::new(StaticSettings(AppSettings {
                allowed_origins: Vec::new(),
                jwt_secret_key: String::new(),
                database_url: String::new(),
                debug: false,
            })),
        )
        .unwrap();

        // files (12) + settings (5) + health (1) + endpoints (5) + cors (2)
        // + headers (5 + csp) + database (6) + frontend (5)
        assert_eq!(registry.len(), 42);
        assert!(registry.find("cors-allow-credentials").is_some());
        assert!(registry.find("db-seed-user").is_some());
        assert!(registry.find("frontend-api-config").is_some());
    }
}
