//! Reducer abstraction and effect descriptions.
//!
//! Reducers hold all transition logic as
//! `(State, Action, Environment) → Effects`: they validate, update state in
//! place and return descriptions of side effects. The session that owns the
//! state executes those effects afterwards.

use crate::types::BookingResult;
use smallvec::SmallVec;

/// Effects returned by a single `reduce` call
pub type Effects = SmallVec<[Effect; 4]>;

/// The Reducer trait - core abstraction for seating logic
///
/// # Example
///
/// ```ignore
/// impl Reducer for SeatingReducer {
///     type State = SeatingState;
///     type Action = SeatingAction;
///     type Environment = SeatingEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut SeatingState,
///         action: SeatingAction,
///         env: &SeatingEnvironment,
///     ) -> Effects {
///         match action {
///             SeatingAction::ToggleSeat { seat_id } => {
///                 // transition logic here
///                 smallvec![Effect::None]
///             }
///             _ => smallvec![Effect::None],
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects;
}

/// Effect type - describes a side effect to be executed
///
/// Effects are NOT executed by the reducer. The owning session runs them
/// after the state change is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// No-op effect
    None,

    /// Hand a committed booking to the completion callback
    BookingComplete(BookingResult),
}

impl Effect {
    /// Whether this effect does nothing
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
