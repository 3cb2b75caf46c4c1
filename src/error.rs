//! Error types.
//!
//! Only genuine usage or invariant failures are errors. Empty registries,
//! unmatched typeahead queries and repeated open/close calls are silent no-ops.

use thiserror::Error;

/// Errors raised by component state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaxError {
    /// A descendant asked for a parent handle that no ancestor provided.
    #[error("<{component} /> is missing a parent <{parent} /> component.")]
    MissingContext {
        component: &'static str,
        parent: &'static str,
    },

    /// A root tried to provide a second handle of the same type into one scope.
    #[error("<{component} /> already provided its context to this scope")]
    ContextAlreadyProvided { component: &'static str },

    /// Internal bookkeeping disagrees with itself.
    #[error("state desync: {0}")]
    StateDesync(String),

    /// Selection was requested for an id that is not a known option.
    #[error("invalid option id: {0}")]
    InvalidOption(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, RaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_context_message_names_both_components() {
        let err = RaxError::MissingContext {
            component: "MenuItem",
            parent: "Menu",
        };
        assert_eq!(
            err.to_string(),
            "<MenuItem /> is missing a parent <Menu /> component."
        );
    }

    #[test]
    fn test_invalid_option_message() {
        let err = RaxError::InvalidOption("tag-9".into());
        assert_eq!(err.to_string(), "invalid option id: tag-9");
    }
}
