//! The decision capability behind every seat.
//!
//! An [`Actor`] is asked for an [`Action`] whenever its seat must act. The
//! call may suspend for as long as the implementation likes (a remote human
//! typing, a bot "thinking"), and it may fail. The betting round never lets
//! a failure escape: [`ActorError::NotImplemented`] degrades to
//! call-if-owed-else-check and every other error becomes a forced fold.
//! Bounding the wait is the job of the call site; wrap an actor in
//! [`TimedActor`] to turn a slow answer into a fold.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::player::Action;
use crate::round::PublicState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActorError {
    #[error("actor capability is not implemented")]
    NotImplemented,
    #[error("actor disconnected")]
    Disconnected,
    #[error("actor did not answer within {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("scripted actor ran out of actions")]
    Exhausted,
}

/// Something that can answer "what do you do?" for one seat.
///
/// `state` is the public snapshot plus the asking seat's own hole cards.
#[async_trait]
pub trait Actor: Send {
    async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError>;
}

type Responder = Box<dyn FnMut(&PublicState) -> Action + Send>;

enum Step {
    Act(Action),
    Respond(Responder),
    Fail(ActorError),
}

/// Plays back a fixed script. Each call consumes one step; an empty script
/// answers [`ActorError::Exhausted`].
///
/// # Examples
///
/// ```
/// use shellpoker_engine::actor::ScriptedActor;
/// use shellpoker_engine::player::Action;
///
/// let actor = ScriptedActor::new([Action::Bet(10), Action::Check]);
/// assert_eq!(actor.remaining(), 2);
/// ```
#[derive(Default)]
pub struct ScriptedActor {
    steps: VecDeque<Step>,
}

impl ScriptedActor {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            steps: actions.into_iter().map(Step::Act).collect(),
        }
    }

    pub fn then(mut self, action: Action) -> Self {
        self.steps.push_back(Step::Act(action));
        self
    }

    /// Appends a step that decides from the snapshot it is shown.
    pub fn then_respond<F>(mut self, f: F) -> Self
    where
        F: FnMut(&PublicState) -> Action + Send + 'static,
    {
        self.steps.push_back(Step::Respond(Box::new(f)));
        self
    }

    pub fn then_fail(mut self, err: ActorError) -> Self {
        self.steps.push_back(Step::Fail(err));
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Debug for ScriptedActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedActor")
            .field("remaining", &self.steps.len())
            .finish()
    }
}

#[async_trait]
impl Actor for ScriptedActor {
    async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError> {
        match self.steps.pop_front() {
            Some(Step::Act(a)) => Ok(a),
            Some(Step::Respond(mut f)) => Ok(f(state)),
            Some(Step::Fail(e)) => Err(e),
            None => Err(ActorError::Exhausted),
        }
    }
}

/// Bounds another actor's decision time. A late answer resolves to
/// [`Action::Fold`] instead of stalling the phase.
#[derive(Debug)]
pub struct TimedActor<A> {
    inner: A,
    limit: Duration,
}

impl<A: Actor> TimedActor<A> {
    pub fn new(inner: A, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<A: Actor> Actor for TimedActor<A> {
    async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError> {
        match tokio::time::timeout(self.limit, self.inner.take_action(state)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    player = state.current_player.as_deref().unwrap_or("?"),
                    limit_ms = self.limit.as_millis() as u64,
                    "actor timed out, folding"
                );
                Ok(Action::Fold)
            }
        }
    }
}
