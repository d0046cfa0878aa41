//! # Framework Errors
//!
//! Error type shared by every actor and client. Entity-specific failures travel boxed inside
//! [`FrameworkError::EntityError`] and can be recovered with [`FrameworkError::into_entity_error`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error, if this is an `EntityError` wrapping an `E`.
    ///
    /// Any other variant (or a box holding a different type) is handed back unchanged.
    pub fn into_entity_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn test_into_entity_error_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.into_entity_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn test_into_entity_error_keeps_other_variants() {
        let err = FrameworkError::NotFound("reagent_9".into());
        match err.into_entity_error::<OutOfStock>() {
            Err(FrameworkError::NotFound(id)) => assert_eq!(id, "reagent_9"),
            other => panic!("unexpected: {:?}", other),
        }

        let foreign = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            foreign.into_entity_error::<OutOfStock>(),
            Err(FrameworkError::EntityError(_))
        ));
    }
}
