//! # Generic Messages
//!
//! Message types exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A row predicate evaluated inside the actor task.
///
/// Used by `List` to select rows and by `CreateUnique` to detect conflicting rows. Because the
/// predicate runs inside the actor's message loop, a conflict check and the insert that follows it
/// observe the same state.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// Matches every row.
    pub fn all() -> Self {
        Self(Box::new(|_| true))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the CRUD lifecycle of a stored row, plus:
///
/// - **List**: every row matching a [`Filter`], in id order.
/// - **CreateUnique**: a conditional insert. The row is created only when no existing row matches
///   `conflict`; otherwise the actor answers `Ok(None)` and nothing is written.
/// - **Action**: a custom [`ActorEntity::Action`] applied to one row.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    CreateUnique {
        params: T::Create,
        conflict: Filter<T>,
        respond_to: Response<Option<T::Id>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
