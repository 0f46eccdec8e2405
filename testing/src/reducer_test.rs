//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use cinema_seating::{Effect, Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion = Box<dyn FnOnce(&[Effect])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Actions given with [`ReducerTest::given_actions`] are reduced first and
/// their effects discarded; only the effects of the action under test reach
/// the effect assertions.
///
/// # Example
///
/// ```ignore
/// use cinema_seating_testing::ReducerTest;
///
/// ReducerTest::new(reducer)
///     .with_env(test_environment())
///     .given_state(state)
///     .when_action(SeatingAction::ToggleSeat { seat_id: "A1".into() })
///     .then_state(|state| {
///         assert_eq!(state.selection.len(), 1);
///     })
///     .then_effects(|effects| {
///         assert_eq!(effects.len(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    setup_actions: Vec<A>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            setup_actions: Vec::new(),
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Actions applied to the initial state before the one under test (Given)
    #[must_use]
    pub fn given_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.setup_actions.extend(actions);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        for setup in self.setup_actions {
            let _ = self.reducer.reduce(&mut state, setup, &env);
        }

        // Execute reducer
        let effects = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use cinema_seating::{BookingResult, Effect};

    /// Assert that there are no side effects to run
    ///
    /// Treats `[]` and `[Effect::None]` alike: both leave nothing for the
    /// session to execute. Use [`assert_empty_effects`] or
    /// [`assert_state_change_only`] when the difference matters.
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects(effects: &[Effect]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the reducer returned nothing at all
    ///
    /// This is what ignored clicks and rejected commits produce.
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_empty_effects(effects: &[Effect]) {
        assert!(
            effects.is_empty(),
            "Expected an empty effect list, but found {effects:?}"
        );
    }

    /// Assert the reducer changed state and returned exactly `[Effect::None]`
    ///
    /// This is what accepted toggles and resets produce.
    ///
    /// # Panics
    ///
    /// Panics unless effects is exactly `[Effect::None]`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_state_change_only(effects: &[Effect]) {
        assert!(
            matches!(effects, [Effect::None]),
            "Expected exactly [Effect::None], but found {effects:?}"
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count(effects: &[Effect], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that exactly one `BookingComplete` effect was produced and return its result
    ///
    /// # Panics
    ///
    /// Panics if there is no `BookingComplete` effect or more than one.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_booking_complete(effects: &[Effect]) -> &BookingResult {
        let results: Vec<&BookingResult> = effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::BookingComplete(result) => Some(result),
                Effect::None => None,
            })
            .collect();
        match results.as_slice() {
            [result] => *result,
            other => panic!(
                "Expected exactly one BookingComplete effect, but found {}",
                other.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_seating::{Effect, Effects, Reducer};
    use smallvec::smallvec;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Effects {
            match action {
                TestAction::Increment => state.count += 1,
                TestAction::Decrement => state.count -= 1,
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
                assertions::assert_state_change_only(effects);
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected an empty effect list")]
    fn test_empty_effects_rejects_none_marker() {
        assertions::assert_empty_effects(&[Effect::None]);
    }

    #[test]
    #[should_panic(expected = "Expected exactly [Effect::None]")]
    fn test_state_change_only_rejects_empty() {
        assertions::assert_state_change_only(&[]);
    }

    #[test]
    fn test_given_actions_run_first() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .given_actions([TestAction::Increment, TestAction::Increment])
            .when_action(TestAction::Decrement)
            .then_state(|state| {
                assert_eq!(state.count, 6);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected exactly one BookingComplete effect")]
    fn test_assert_booking_complete_requires_effect() {
        let _ = assertions::assert_booking_complete(&[Effect::None]);
    }
}
