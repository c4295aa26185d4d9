use orrery_bodies::BodyError;

/// Errors raised while building or editing a [`Scene`](crate::Scene).
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The body tree was rejected at registration.
    #[error(transparent)]
    Bodies(#[from] BodyError),

    /// No body carries this name.
    #[error("no body named '{0}'")]
    UnknownBody(String),

    /// An edit tried to change a body's identity or hierarchy.
    #[error("cannot change {field} of body '{body}' after registration")]
    StructuralChange { body: String, field: &'static str },
}
