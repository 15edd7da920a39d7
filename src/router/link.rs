use url::Url;

/// A click the host observed, reduced to what the router needs: the `href` of
/// the nearest enclosing anchor (if any) and whether default handling was
/// already suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkClick {
    href: Option<String>,
    default_prevented: bool,
}

impl LinkClick {
    /// A click inside an anchor pointing at `href`.
    pub fn anchor(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            default_prevented: false,
        }
    }

    /// A click outside of any anchor.
    pub fn elsewhere() -> Self {
        Self::default()
    }

    #[inline]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    #[inline]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    #[inline]
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Resolves `href` against `origin` + `location` and returns its path and
/// query when it stays on the same origin.
pub(crate) fn same_origin_target(href: &str, origin: &str, location: &str) -> Option<String> {
    let document = Url::parse(origin).ok()?.join(location).ok()?;
    let target = document.join(href).ok()?;

    if target.origin() != document.origin() {
        return None;
    }

    let mut out = target.path().to_string();
    if let Some(query) = target.query() {
        out.push('?');
        out.push_str(query);
    }
    Some(out)
}
