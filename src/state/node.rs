use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt;
use std::sync::{Arc, Weak};

use super::Params;
use crate::events::{Handler, HandlerResult, Sequencer};
use crate::pattern::{Captures, Matcher};
use crate::router::RouterContext;

pub(crate) type ActiveChain = SmallVec<[State; 8]>;

#[derive(Debug, Default)]
pub(crate) struct Children {
    // insertion order is match priority
    pub(crate) ordered: Vec<State>,
    // matcher id -> index into `ordered`
    pub(crate) by_matcher: FastHashMap<Box<str>, usize>,
}

#[derive(Debug, Default)]
struct Activation {
    params: Option<Params>,
    active_child: Option<State>,
}

pub(crate) struct StateNode {
    pub(crate) matcher: Matcher,
    parent: Weak<StateNode>,
    pub(crate) context: Arc<RouterContext>,
    pub(crate) children: RwLock<Children>,
    activation: RwLock<Activation>,
    events: Sequencer,
}

/// A node of the routing tree.
///
/// `State` is a shared handle: clones refer to the same node, and equality is
/// node identity.
#[derive(Clone)]
pub struct State {
    pub(crate) node: Arc<StateNode>,
}

impl State {
    pub(crate) fn root(context: Arc<RouterContext>) -> Self {
        let state = Self::detached(Matcher::any(), Weak::new(), context);
        state.node.activation.write().params = Some(Params::root());
        state
    }

    pub(crate) fn child_of(parent: &State, matcher: Matcher) -> Self {
        Self::detached(
            matcher,
            Arc::downgrade(&parent.node),
            parent.node.context.clone(),
        )
    }

    fn detached(matcher: Matcher, parent: Weak<StateNode>, context: Arc<RouterContext>) -> Self {
        Self {
            node: Arc::new(StateNode {
                matcher,
                parent,
                context,
                children: RwLock::new(Children::default()),
                activation: RwLock::new(Activation::default()),
                events: Sequencer::new(),
            }),
        }
    }

    #[inline]
    pub fn matcher(&self) -> &Matcher {
        &self.node.matcher
    }

    pub fn parent(&self) -> Option<State> {
        self.node.parent.upgrade().map(|node| State { node })
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.upgrade().is_none()
    }

    pub fn children(&self) -> Vec<State> {
        self.node.children.read().ordered.clone()
    }

    /// Runs this state's matcher against one path segment.
    #[inline]
    pub fn test(&self, segment: &str) -> Option<Captures> {
        self.node.matcher.exec(segment)
    }

    pub fn params(&self) -> Option<Params> {
        self.node.activation.read().params.clone()
    }

    /// Path recorded at activation, `None` while inactive.
    pub fn path(&self) -> Option<String> {
        self.node
            .activation
            .read()
            .params
            .as_ref()
            .map(|p| p.path().to_string())
    }

    pub fn is_active(&self) -> bool {
        self.node.activation.read().params.is_some()
    }

    /// Whether the state is active with exactly `params`.
    pub fn is_active_with(&self, params: &Params) -> bool {
        self.node.activation.read().params.as_ref() == Some(params)
    }

    pub fn active_child(&self) -> Option<State> {
        self.node.activation.read().active_child.clone()
    }

    /// The deepest state of the active chain below (and including) this one.
    pub fn deepest_active(&self) -> State {
        let mut current = self.clone();
        while let Some(next) = current.active_child() {
            current = next;
        }
        current
    }

    /// Registers `handler` for `event` on this state.
    pub fn on(&self, event: &str, handler: Handler) -> &Self {
        self.node.events.on(event, handler);
        self
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.node.events.listener_count(event)
    }

    /// Runs the handlers registered for `event` in order, with this state as
    /// their receiver.
    pub async fn emit(&self, event: &str) -> HandlerResult {
        self.node.events.emit(self, event).await
    }

    #[inline]
    pub fn ptr_eq(&self, other: &State) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    pub(crate) fn context(&self) -> &Arc<RouterContext> {
        &self.node.context
    }

    /// Label used in logs and errors.
    pub(crate) fn label(&self) -> String {
        match self.path() {
            Some(path) => path,
            None if self.is_root() => "/".to_string(),
            None => self.node.matcher.pattern().to_string(),
        }
    }

    pub(crate) fn set_params(&self, params: Option<Params>) {
        self.node.activation.write().params = params;
    }

    pub(crate) fn set_active_child(&self, child: Option<State>) {
        self.node.activation.write().active_child = child;
    }

    /// Detaches the active chain below this state and returns it shallow to
    /// deep. The state's own `active_child` is cleared before returning.
    pub(crate) fn take_active_chain(&self) -> ActiveChain {
        let mut chain = ActiveChain::new();
        let mut next = self.node.activation.write().active_child.take();
        while let Some(state) = next {
            next = state.active_child();
            chain.push(state);
        }
        chain
    }

    /// Marks the state inactive without emitting anything.
    pub(crate) fn reset(&self) {
        let mut guard = self.node.activation.write();
        guard.params = None;
        guard.active_child = None;
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for State {}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let activation = self.node.activation.read();
        f.debug_struct("State")
            .field("pattern", &self.node.matcher.pattern())
            .field("params", &activation.params)
            .field("has_active_child", &activation.active_child.is_some())
            .field("children", &self.node.children.read().ordered.len())
            .finish()
    }
}
