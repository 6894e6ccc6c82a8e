//! Checks against the verified application's own settings

use crate::connectivity::origin_authority;
use readinator_core::{
    CheckCategory, CheckDefinition, CheckError, CheckRegistry, Config, ReadinatorError,
    RunnableCheck, SettingsSource, Severity,
};
use std::path::PathBuf;
use std::sync::Arc;

/// The env file the application loads its settings from must exist
pub struct EnvFilePresentCheck {
    definition: CheckDefinition,
    path: PathBuf,
}

impl EnvFilePresentCheck {
    pub fn new(path: PathBuf) -> Self {
        Self {
            definition: CheckDefinition::new(
                "config-env-file",
                "Env file exists",
                CheckCategory::BackendConfig,
                Severity::Critical,
            )
            .with_remediation("Create the env file from its .example template"),
            path,
        }
    }
}

impl RunnableCheck for EnvFilePresentCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        if self.path.is_file() {
            Ok(format!("{} present", self.path.display()))
        } else {
            Err(CheckError::MissingResource(format!(
                "{} not found",
                self.path.display()
            )))
        }
    }
}

/// Settings must load and parse
pub struct SettingsLoadCheck {
    definition: CheckDefinition,
    source: Arc<dyn SettingsSource>,
}

impl SettingsLoadCheck {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "config-loads",
                "Configuration loads successfully",
                CheckCategory::BackendConfig,
                Severity::Critical,
            ),
            source,
        }
    }
}

impl RunnableCheck for SettingsLoadCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        self.source.load()?;
        Ok("settings load successfully".to_string())
    }
}

/// The allowed origins must include the frontend origin
pub struct AllowedOriginsCheck {
    definition: CheckDefinition,
    source: Arc<dyn SettingsSource>,
    origin: String,
}

impl AllowedOriginsCheck {
    pub fn new(config: &Config, source: Arc<dyn SettingsSource>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "config-allowed-origins",
                "CORS configured for the frontend origin",
                CheckCategory::BackendConfig,
                Severity::Critical,
            )
            .with_remediation("Add the frontend origin to ALLOWED_ORIGINS"),
            source,
            origin: config.target.frontend_origin.clone(),
        }
    }
}

impl RunnableCheck for AllowedOriginsCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let settings = self.source.load()?;
        let authority = origin_authority(&self.origin);
        if settings
            .allowed_origins
            .iter()
            .any(|origin| origin.contains(authority))
        {
            Ok(format!("CORS configured for {}", authority))
        } else {
            Err(CheckError::Assertion(format!(
                "allowed origins {:?} do not include {}",
                settings.allowed_origins, self.origin
            )))
        }
    }
}

/// The JWT signing secret must meet the minimum length
pub struct JwtSecretLengthCheck {
    definition: CheckDefinition,
    source: Arc<dyn SettingsSource>,
    min_length: usize,
}

impl JwtSecretLengthCheck {
    pub fn new(config: &Config, source: Arc<dyn SettingsSource>) -> Self {
        let min_length = config.settings.min_secret_length;
        Self {
            definition: CheckDefinition::new(
                "config-jwt-secret",
                format!("JWT secret key is secure (>= {} chars)", min_length),
                CheckCategory::BackendConfig,
                Severity::Critical,
            )
            .with_remediation("Generate a longer JWT_SECRET_KEY"),
            source,
            min_length,
        }
    }
}

impl RunnableCheck for JwtSecretLengthCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let settings = self.source.load()?;
        let length = settings.jwt_secret_key.len();
        if length >= self.min_length {
            Ok(format!("JWT secret key is {} chars", length))
        } else {
            Err(CheckError::Assertion(format!(
                "JWT secret key too short ({} chars, minimum {})",
                length, self.min_length
            )))
        }
    }
}

/// Debug mode should be off for a deployment
pub struct DebugModeCheck {
    definition: CheckDefinition,
    source: Arc<dyn SettingsSource>,
}

impl DebugModeCheck {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "config-debug-mode",
                "Debug mode disabled",
                CheckCategory::BackendConfig,
                Severity::Advisory,
            ),
            source,
        }
    }
}

impl RunnableCheck for DebugModeCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let settings = self.source.load()?;
        if settings.debug {
            Err(CheckError::Assertion(
                "debug mode is enabled".to_string(),
            ))
        } else {
            Ok("debug mode disabled".to_string())
        }
    }
}

/// Register all backend-configuration checks
pub fn register_settings_checks(
    registry: &mut CheckRegistry,
    config: &Config,
    source: Arc<dyn SettingsSource>,
) -> Result<(), ReadinatorError> {
    registry.register(Box::new(EnvFilePresentCheck::new(
        config.files.root.join(&config.settings.env_file),
    )))?;
    registry.register(Box::new(SettingsLoadCheck::new(source.clone())))?;
    registry.register(Box::new(AllowedOriginsCheck::new(config, source.clone())))?;
    registry.register(Box::new(JwtSecretLengthCheck::new(config, source.clone())))?;
    registry.register(Box::new(DebugModeCheck::new(source)))
}
