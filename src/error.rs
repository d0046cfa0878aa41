//! # Error Handling
//!
//! One error type for the whole inventory domain. Entities return it from their hooks, the actor
//! framework boxes it, and [`From<FrameworkError>`] recovers it on the client side, so callers can
//! match on `InsufficientStock` no matter how many actors the request crossed.
use actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Not authorized: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Notification delivery failed: {0}")]
    NotificationDelivery(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

impl From<FrameworkError> for InventoryError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<InventoryError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => InventoryError::NotFound(id),
            Err(other) => InventoryError::Store(other.to_string()),
        }
    }
}

// Required by ActorClient::Error
impl From<String> for InventoryError {
    fn from(msg: String) -> Self {
        InventoryError::Store(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_survive_the_framework() {
        let boxed = FrameworkError::EntityError(Box::new(InventoryError::InsufficientStock {
            requested: 5,
            available: 3,
        }));
        assert_eq!(
            InventoryError::from(boxed),
            InventoryError::InsufficientStock {
                requested: 5,
                available: 3
            }
        );
    }

    #[test]
    fn framework_failures_map_to_store_or_not_found() {
        assert_eq!(
            InventoryError::from(FrameworkError::NotFound("reagent_9".into())),
            InventoryError::NotFound("reagent_9".into())
        );
        assert!(matches!(
            InventoryError::from(FrameworkError::ActorClosed),
            InventoryError::Store(_)
        ));

        let foreign = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            InventoryError::from(foreign),
            InventoryError::Store(msg) if msg.contains("disk")
        ));
    }
}
