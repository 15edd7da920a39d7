use super::State;
use crate::events::{AT, CLOSE, Handler, OPEN};
use crate::path;
use crate::pattern::{Matcher, PatternResult, compile_with};

impl State {
    /// Finds the state `path` leads to below this one.
    ///
    /// Each segment is compiled and compared by matcher identity, not matched
    /// against: `get("albums/page:number")` finds the state registered with
    /// that exact pattern. With `create` missing states are appended to the
    /// tree; otherwise a missing state yields `None`. An empty path is this
    /// state.
    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, create = create))]
    pub fn get(&self, path: &str, create: bool) -> PatternResult<Option<State>> {
        let segments = path::split(path);
        let mut current = self.clone();

        for segment in segments {
            current = if create {
                current.child_or_insert(segment)?
            } else {
                match current.find_child(segment)? {
                    Some(next) => next,
                    None => return Ok(None),
                }
            };
        }

        Ok(Some(current))
    }

    /// Same as `get(path, true)`.
    pub fn child(&self, path: &str) -> PatternResult<State> {
        let mut current = self.clone();
        for segment in path::split(path) {
            current = current.child_or_insert(segment)?;
        }
        Ok(current)
    }

    /// Registers `"at"` handlers on the state at `path`, creating it if needed.
    pub fn at<I>(&self, path: &str, handlers: I) -> PatternResult<State>
    where
        I: IntoIterator<Item = Handler>,
    {
        self.register(path, AT, handlers)
    }

    /// Registers `"open"` handlers on the state at `path`, creating it if needed.
    pub fn open<I>(&self, path: &str, handlers: I) -> PatternResult<State>
    where
        I: IntoIterator<Item = Handler>,
    {
        self.register(path, OPEN, handlers)
    }

    /// Registers `"close"` handlers on the state at `path`, creating it if needed.
    pub fn close<I>(&self, path: &str, handlers: I) -> PatternResult<State>
    where
        I: IntoIterator<Item = Handler>,
    {
        self.register(path, CLOSE, handlers)
    }

    fn register<I>(&self, path: &str, event: &str, handlers: I) -> PatternResult<State>
    where
        I: IntoIterator<Item = Handler>,
    {
        let state = self.child(path)?;
        for handler in handlers {
            state.on(event, handler);
        }
        Ok(state)
    }

    fn compile_segment(&self, segment: &str) -> PatternResult<Matcher> {
        compile_with(segment, self.context().options.case_sensitive)
    }

    fn find_child(&self, segment: &str) -> PatternResult<Option<State>> {
        let matcher = self.compile_segment(segment)?;
        Ok(self.find_by_matcher(matcher.id()))
    }

    fn child_or_insert(&self, segment: &str) -> PatternResult<State> {
        let matcher = self.compile_segment(segment)?;
        if let Some(found) = self.find_by_matcher(matcher.id()) {
            return Ok(found);
        }

        let mut children = self.node.children.write();
        // another handle may have inserted the same pattern meanwhile
        if let Some(&idx) = children.by_matcher.get(matcher.id()) {
            return Ok(children.ordered[idx].clone());
        }

        let id: Box<str> = matcher.id().into();
        let child = State::child_of(self, matcher);
        let idx = children.ordered.len();
        children.ordered.push(child.clone());
        children.by_matcher.insert(id, idx);

        tracing::debug!(parent = %self.label(), pattern = %segment, "state created");
        Ok(child)
    }

    fn find_by_matcher(&self, id: &str) -> Option<State> {
        let children = self.node.children.read();
        children
            .by_matcher
            .get(id)
            .map(|&idx| children.ordered[idx].clone())
    }
}
