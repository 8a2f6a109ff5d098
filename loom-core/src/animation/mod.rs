pub mod runtime;
pub mod schedule;

pub use runtime::{ActorState, AnimationRuntime, create_runtime};
