use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

use super::{NavigationError, NavigationResult};
use crate::events::{AT, BEFORE_CLOSE, CLOSE, OPEN};
use crate::path;
use crate::state::{Params, State};

type Segments = Arc<[String]>;

impl State {
    /// Navigates to `path`, relative to this state.
    ///
    /// Leading segments already implied by this state's position are left
    /// out: on the state of `/albums`, `navigate("page2")` targets
    /// `/albums/page2`. An empty path or `"/"` returns to this state itself.
    /// `.` and `..` are resolved first; a target outside this state is
    /// reached from the nearest ancestor that contains it.
    ///
    /// Segments past the deepest matching state are ignored and the history
    /// is left at the deepest matched path. Handler failures abort the
    /// navigation; states closed or opened before the failure stay that way.
    pub fn navigate(&self, path: &str) -> BoxFuture<'static, NavigationResult<()>> {
        let state = self.clone();
        let path = path.to_string();
        async move { state.navigate_from_here(&path).await }.boxed()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
    async fn navigate_from_here(&self, path: &str) -> NavigationResult<()> {
        let base = self
            .path()
            .ok_or_else(|| NavigationError::InactiveContext {
                pattern: self.matcher().pattern().to_string(),
            })?;
        let target = path::join(&base, path::strip_query(path));
        let (scope, rel) = self.scope_for(&target);
        let segments = scope.checked_segments(&rel)?;

        let history = self.context().history.clone();
        let location = history.location();
        if target == path::normalize(path::strip_query(&location)) {
            tracing::trace!(location = %location, "already at target");
            return Ok(());
        }

        tracing::debug!(from = %base, target = %target, "navigating");
        history.push_entry(&location);

        if segments.is_empty() {
            scope.close_children().await?;
            history.replace_entry(&target);
            return scope.emit_at().await;
        }

        descend(scope, segments, 0).await
    }

    /// The nearest active state, starting here and walking up, whose path
    /// contains `target`, with the part of `target` left below it.
    fn scope_for(&self, target: &str) -> (State, String) {
        let mut scope = self.clone();
        loop {
            let base = scope.path().unwrap_or_else(|| "/".to_string());
            if let Some(rest) = remainder(&base, target) {
                return (scope, rest.to_string());
            }
            match scope.parent() {
                Some(parent) => scope = parent,
                None => return (scope, target.to_string()),
            }
        }
    }

    /// Brings the tree in line with `path` without touching the back stack
    /// beyond replacing the current entry. Used when the location changed
    /// outside the router.
    pub(crate) fn resync(&self, path: &str) -> BoxFuture<'static, NavigationResult<()>> {
        let state = self.clone();
        let rel = path::normalize(path::strip_query(path));
        async move {
            let segments = state.checked_segments(&rel)?;
            if segments.is_empty() {
                state.close_children().await?;
                return state.emit_at().await;
            }
            descend(state, segments, 0).await
        }
        .boxed()
    }

    /// Closes every active state below this one.
    ///
    /// `"before close"` runs shallow to deep, then `"close"` deep to shallow.
    /// `active_child` is cleared before any handler runs. When a handler
    /// fails the remaining emissions are skipped, but every state of the
    /// chain is still marked inactive.
    pub async fn close_children(&self) -> NavigationResult<()> {
        // a close handler may navigate and install a new chain here
        loop {
            let chain = self.take_active_chain();
            if chain.is_empty() {
                return Ok(());
            }

            tracing::debug!(state = %self.label(), count = chain.len(), "closing active chain");

            if let Err(err) = close_chain(&chain).await {
                for state in &chain {
                    state.reset();
                }
                return Err(err);
            }
        }
    }

    pub(crate) async fn activate(&self, params: Params) -> NavigationResult<()> {
        tracing::debug!(state = %params.path(), "opening");
        self.set_params(Some(params));
        self.emit(OPEN)
            .await
            .map_err(|err| NavigationError::handler(self.label(), OPEN, err))
    }

    pub(crate) async fn deactivate(&self) -> NavigationResult<()> {
        let label = self.label();
        let result = self.emit(CLOSE).await;
        self.reset();
        result.map_err(|err| NavigationError::handler(label, CLOSE, err))
    }

    async fn emit_at(&self) -> NavigationResult<()> {
        self.emit(AT)
            .await
            .map_err(|err| NavigationError::handler(self.label(), AT, err))
    }

    fn checked_segments(&self, rel: &str) -> NavigationResult<Segments> {
        let segments = path::split(rel);
        let limit = self.context().options.max_depth;
        if segments.len() > limit {
            return Err(NavigationError::TooDeep {
                path: rel.to_string(),
                depth: segments.len(),
                limit,
            });
        }
        Ok(segments.iter().map(|seg| seg.to_string()).collect())
    }
}

/// `target` relative to `base`, or `None` when it lies outside of it.
fn remainder<'a>(base: &str, target: &'a str) -> Option<&'a str> {
    if base == "/" {
        return Some(target.trim_start_matches('/'));
    }
    match target.strip_prefix(base)? {
        "" => Some(""),
        rest => rest.strip_prefix('/'),
    }
}

async fn close_chain(chain: &[State]) -> NavigationResult<()> {
    for state in chain {
        state
            .emit(BEFORE_CLOSE)
            .await
            .map_err(|err| NavigationError::handler(state.label(), BEFORE_CLOSE, err))?;
    }

    for state in chain.iter().rev() {
        state.deactivate().await?;
    }

    Ok(())
}

fn descend(state: State, segments: Segments, index: usize) -> BoxFuture<'static, NavigationResult<()>> {
    async move {
        let Some(segment) = segments.get(index) else {
            return Ok(());
        };
        let last = index + 1 == segments.len();
        let base = state.path().unwrap_or_else(|| "/".to_string());
        let history = state.context().history.clone();

        for child in state.children() {
            let Some(captures) = child.test(segment) else {
                continue;
            };

            let params = Params::new(captures, path::join(&base, segment));
            history.replace_entry(params.path());

            if child.is_active_with(&params) {
                tracing::trace!(state = %params.path(), "already active");
                if last {
                    return child.close_children().await;
                }
                return descend(child, segments.clone(), index + 1).await;
            }

            state.close_children().await?;
            // close handlers may have navigated elsewhere
            history.replace_entry(params.path());
            state.set_active_child(Some(child.clone()));
            child.activate(params).await?;

            if last {
                return child.emit_at().await;
            }
            return descend(child, segments.clone(), index + 1).await;
        }

        tracing::debug!(state = %base, segment = %segment, "no state matches; stopping here");
        Ok(())
    }
    .boxed()
}
