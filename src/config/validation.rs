//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route tree (names, patterns, wildcard placement)
//! - Check view mapping settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{RouteTable, TableError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Route(#[from] TableError),

    #[error("views.extension must not be empty")]
    EmptyViewExtension,

    #[error("views.extension `{0}` must not start with a dot")]
    DottedViewExtension(String),

    #[error("views.alias `{0}` must not contain `/`")]
    InvalidViewAlias(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = RouteTable::check(&config.routes)
        .into_iter()
        .map(ValidationError::from)
        .collect();

    let extension = config.views.extension.trim();
    if extension.is_empty() {
        errors.push(ValidationError::EmptyViewExtension);
    } else if extension.starts_with('.') {
        errors.push(ValidationError::DottedViewExtension(extension.to_string()));
    }

    if config.views.alias.contains('/') {
        errors.push(ValidationError::InvalidViewAlias(config.views.alias.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.views.extension = ".vue".into();
        config.views.alias = "@/src".into();
        config.routes.insert(0, RouteConfig::new("extra", "dashboard", "views/Extra"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Route(TableError::DuplicateName(
            "dashboard".into()
        ))));
        assert!(errors.contains(&ValidationError::DottedViewExtension(".vue".into())));
        assert!(errors.contains(&ValidationError::InvalidViewAlias("@/src".into())));
    }
}
