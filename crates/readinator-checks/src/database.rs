//! Database schema and seed-data checks

use readinator_core::{
    CheckCategory, CheckDefinition, CheckError, CheckRegistry, DatabaseConfig, DatabaseProbe,
    ReadinatorError, RunnableCheck, Severity,
};
use std::sync::Arc;

/// The database must be reachable
pub struct ConnectionCheck {
    definition: CheckDefinition,
    probe: Arc<dyn DatabaseProbe>,
}

impl ConnectionCheck {
    pub fn new(probe: Arc<dyn DatabaseProbe>) -> Self {
        Self {
            definition: CheckDefinition::new(
                "db-connection",
                "Database connection successful",
                CheckCategory::Database,
                Severity::Critical,
            )
            .with_remediation("Ensure PostgreSQL is running and DATABASE_URL is correct"),
            probe,
        }
    }
}

impl RunnableCheck for ConnectionCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let tables = self.probe.list_tables()?;
        Ok(format!("connected ({} tables in public schema)", tables.len()))
    }
}

/// A table the migrations must have created
pub struct TableExistsCheck {
    definition: CheckDefinition,
    probe: Arc<dyn DatabaseProbe>,
    table: String,
}

impl TableExistsCheck {
    pub fn new(table: impl Into<String>, probe: Arc<dyn DatabaseProbe>) -> Self {
        let table = table.into();
        Self {
            definition: CheckDefinition::new(
                format!("db-table-{}", table),
                format!("Table '{}' exists", table),
                CheckCategory::Database,
                Severity::Critical,
            )
            .with_remediation("Run the database migrations"),
            probe,
            table,
        }
    }
}

impl RunnableCheck for TableExistsCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let tables = self.probe.list_tables()?;
        if tables.iter().any(|t| t == &self.table) {
            Ok("present".to_string())
        } else {
            Err(CheckError::MissingResource(format!(
                "table '{}' missing",
                self.table
            )))
        }
    }
}

/// The seed user should exist
pub struct SeedUserCheck {
    definition: CheckDefinition,
    probe: Arc<dyn DatabaseProbe>,
    username: String,
}

impl SeedUserCheck {
    pub fn new(username: impl Into<String>, probe: Arc<dyn DatabaseProbe>) -> Self {
        let username = username.into();
        Self {
            definition: CheckDefinition::new(
                "db-seed-user",
                format!("Seed user '{}' exists", username),
                CheckCategory::Database,
                Severity::Advisory,
            )
            .with_remediation("Run the database seed script"),
            probe,
            username,
        }
    }
}

impl RunnableCheck for SeedUserCheck {
    fn definition(&self) -> &CheckDefinition {
        &self.definition
    }

    fn execute(&self) -> Result<String, CheckError> {
        let count = self.probe.count_users(&self.username)?;
        if count > 0 {
            Ok(format!("user '{}' exists", self.username))
        } else {
            Err(CheckError::MissingResource(format!(
                "user '{}' not found",
                self.username
            )))
        }
    }
}

/// Register connection, schema, and seed-data checks
pub fn register_database_checks(
    registry: &mut CheckRegistry,
    config: &DatabaseConfig,
    probe: Arc<dyn DatabaseProbe>,
) -> Result<(), ReadinatorError> {
    registry.register(Box::new(ConnectionCheck::new(probe.clone())))?;
    for table in &config.required_tables {
        registry.register(Box::new(TableExistsCheck::new(table.clone(), probe.clone())))?;
    }
    registry.register(Box::new(SeedUserCheck::new(
        config.seed_username.clone(),
        probe,
    )))
}
