use bevy::prelude::*;

/// Level content that breaks an assumption of the gameplay logic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HoodError {
    /// Keys must be attached to a holder entity, which carries the outline and gets removed
    /// together with the key.
    #[error("Key {key} has no holder it is attached to")]
    KeyWithoutHolder { key: Entity },
}
