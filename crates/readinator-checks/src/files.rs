//! Filesystem checks: required files and frontend entry-point markers

use readinator_core::{
    CheckCategory, CheckDefinition, CheckError, CheckRegistry, Config, FilesConfig,
    ReadinatorError, RunnableCheck, Severity,
};
use std::path::{Path, PathBuf};

fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

fn id_slug(relative: &str) -> String {
    relative
        .to_lowercase()
        .replace(['/', '\\', '.'], "-")
        .trim_matches('-')
        .to_string()
}

/// A required file must exist under the project root
pub struct FileExistsCheck {
    definition: CheckDefinition,
    path: PathBuf,
}

impl FileExistsCheck {
    pub fn new(
        id: impl Into<String>,
        relative: &str,
        path: PathBuf,
        category: CheckCategory,
    ) -> Self {
        Self {
            definition: CheckDefinition::new(id, relative, category, Severity::Critical),
            path,
        }
    }
}

impl RunnableCheck for FileExistsCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        if file_exists(&self.path) {
            Ok("present".to_string())
        } else {
            Err(CheckError::MissingResource(format!(
                "{} missing",
                self.path.display()
            )))
        }
    }
}

/// The entry-point file must contain a given substring
pub struct EntrypointContainsCheck {
    definition: CheckDefinition,
    path: PathBuf,
    needle: String,
}

impl EntrypointContainsCheck {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        path: PathBuf,
        needle: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            definition: CheckDefinition::new(id, description, CheckCategory::Frontend, severity),
            path,
            needle: needle.into(),
        }
    }
}

impl RunnableCheck for EntrypointContainsCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let content = std::fs::read_to_string(&self.path)?;
        if content.contains(&self.needle) {
            Ok(format!("'{}' present", self.needle))
        } else {
            Err(CheckError::MissingResource(format!(
                "'{}' not found in {}",
                self.needle,
                self.path.display()
            )))
        }
    }
}

/// Register one existence check per required file
pub fn register_file_checks(
    registry: &mut CheckRegistry,
    files: &FilesConfig,
) -> Result<(), ReadinatorError> {
    for relative in files.frontend.iter().chain(files.backend.iter()) {
        registry.register(Box::new(FileExistsCheck::new(
            format!("file-{}", id_slug(relative)),
            relative,
            files.root.join(relative),
            CheckCategory::FileStructure,
        )))?;
    }
    Ok(())
}

/// Register the frontend entry-point checks
pub fn register_frontend_checks(
    registry: &mut CheckRegistry,
    config: &Config,
) -> Result<(), ReadinatorError> {
    let entrypoint = config.files.root.join(&config.files.entrypoint);

    registry.register(Box::new(FileExistsCheck::new(
        "frontend-entrypoint",
        &config.files.entrypoint,
        entrypoint.clone(),
        CheckCategory::Frontend,
    )))?;

    registry.register(Box::new(EntrypointContainsCheck::new(
        "frontend-api-config",
        "API configuration present in entry point",
        entrypoint.clone(),
        config.files.api_config_marker.clone(),
        Severity::Critical,
    )))?;

    registry.register(Box::new(EntrypointContainsCheck::new(
        "frontend-api-url",
        "API URL configured for development",
        entrypoint.clone(),
        config.target.api_url(""),
        Severity::Advisory,
    )))?;

    for host in &config.target.cdn_hosts {
        registry.register(Box::new(EntrypointContainsCheck::new(
            format!("frontend-cdn-{}", id_slug(host)),
            format!("CDN resource referenced: {}", host),
            entrypoint.clone(),
            host.clone(),
            Severity::Advisory,
        )))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn existing_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<html></html>").unwrap();

        let check =
            FileExistsCheck::new("file-index-html", "index.html", path, CheckCategory::FileStructure);
        assert!(check.execute().is_ok());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let check = FileExistsCheck::new(
            "file-index-html",
            "index.html",
            dir.path().join("index.html"),
            CheckCategory::FileStructure,
        );
        assert!(matches!(
            check.execute().unwrap_err(),
            CheckError::MissingResource(_)
        ));
    }

    #[test]
    fn entrypoint_marker_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<script>window.API_CONFIG = {};</script>").unwrap();

        let found = EntrypointContainsCheck::new(
            "frontend-api-config",
            "API configuration present",
            path.clone(),
            "window.API_CONFIG",
            Severity::Critical,
        );
        assert!(found.execute().is_ok());

        let missing = EntrypointContainsCheck::new(
            "frontend-cdn",
            "CDN referenced",
            path,
            "cdnjs.cloudflare.com",
            Severity::Advisory,
        );
        assert!(missing.execute().is_err());
    }

    #[test]
    fn file_checks_cover_both_groups() {
        let dir = tempfile::tempdir().unwrap();
        let files = FilesConfig {
            root: dir.path().to_path_buf(),
            frontend: vec!["index.html".to_string()],
            backend: vec!["backend/.env.example".to_string()],
            ..FilesConfig::default()
        };

        let mut registry = CheckRegistry::new();
        register_file_checks(&mut registry, &files).unwrap();

        let ids: Vec<_> = registry
            .checks()
            .iter()
            .map(|c| c.definition().id.clone())
            .collect();
        assert_eq!(ids, vec!["file-index-html", "file-backend--env-example"]);
    }
}
