use futures::future::BoxFuture;
use std::sync::Arc;

use super::context::RouterContext;
use super::link::{LinkClick, same_origin_target};
use crate::errors::RouterResult;
use crate::history::History;
use crate::navigation::NavigationResult;
use crate::router::RouterOptions;
use crate::state::State;

/// A routing tree bound to one [`History`].
///
/// The root state is permanent: it is always active with path `/` and is
/// never opened or closed itself.
#[derive(Debug)]
pub struct Router {
    root: State,
    context: Arc<RouterContext>,
}

impl Router {
    pub fn new(history: Arc<dyn History>, options: Option<RouterOptions>) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;

        let context = Arc::new(RouterContext::new(history, options));
        Ok(Self {
            root: State::root(context.clone()),
            context,
        })
    }

    #[inline]
    pub fn root(&self) -> &State {
        &self.root
    }

    #[inline]
    pub fn history(&self) -> &Arc<dyn History> {
        &self.context.history
    }

    #[inline]
    pub fn options(&self) -> &RouterOptions {
        &self.context.options
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.context.is_running()
    }

    /// Starts reacting to clicks and history changes.
    ///
    /// With a `base_path` the tree is first brought in line with it, without
    /// adding a history entry. Does nothing when already running.
    pub async fn start(&self, base_path: Option<&str>) -> NavigationResult<()> {
        if !self.context.set_running(true) {
            return Ok(());
        }
        tracing::debug!(base = ?base_path, "router started");

        match base_path {
            Some(path) => self.root.resync(path).await,
            None => Ok(()),
        }
    }

    /// Stops reacting to clicks and history changes. Does nothing when not
    /// running.
    pub fn stop(&self) {
        if self.context.set_running(false) {
            tracing::debug!("router stopped");
        }
    }

    /// Same as navigating on the root state.
    pub fn navigate(&self, path: &str) -> BoxFuture<'static, NavigationResult<()>> {
        self.root.navigate(path)
    }

    /// Takes over a click on a same-origin anchor.
    ///
    /// When the click is intercepted it is marked default-prevented and the
    /// navigation to the anchor's path and query is returned for the host to
    /// drive. Returns `None` when stopped, when the click was already
    /// handled, or when it does not target this document's origin.
    pub fn handle_click(
        &self,
        click: &mut LinkClick,
    ) -> Option<BoxFuture<'static, NavigationResult<()>>> {
        if !self.is_running() || click.is_default_prevented() {
            return None;
        }

        let history = &self.context.history;
        let target = same_origin_target(click.href()?, &history.origin(), &history.location())?;

        click.prevent_default();
        tracing::trace!(target = %target, "link intercepted");
        Some(self.root.navigate(&target))
    }

    /// Re-syncs the tree after the user moved back or forward.
    ///
    /// No entry is pushed; the current location is only rewritten if it
    /// reaches past the defined states. Returns `None` when stopped.
    pub fn handle_pop_state(&self) -> Option<BoxFuture<'static, NavigationResult<()>>> {
        if !self.is_running() {
            return None;
        }

        let location = self.context.history.location();
        tracing::trace!(location = %location, "history moved");
        Some(self.root.resync(&location))
    }
}
