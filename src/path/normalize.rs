use smallvec::SmallVec;

pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Splits a path into its non-empty `/`-delimited segments.
#[inline]
pub fn split(path: &str) -> Segments<'_> {
    path.split('/').filter(|seg| !seg.is_empty()).collect()
}

/// Returns the path portion of a location, dropping any query or fragment.
#[inline]
pub fn strip_query(location: &str) -> &str {
    match memchr::memchr2(b'?', b'#', location.as_bytes()) {
        Some(idx) => &location[..idx],
        None => location,
    }
}

/// Joins `rel` onto `base` and normalizes the result.
///
/// Duplicate slashes collapse, `.` segments vanish and `..` pops the previous
/// segment (never above the root). The result always starts with `/` and only
/// the root itself ends with one.
pub fn join<'a>(base: &'a str, rel: &'a str) -> String {
    let mut stack: Segments<'a> = SmallVec::new();

    for seg in base.split('/').chain(rel.split('/')) {
        match seg {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    if stack.is_empty() {
        return "/".to_string();
    }

    let mut out = String::with_capacity(base.len() + rel.len() + 1);
    for seg in stack {
        out.push('/');
        out.push_str(seg);
    }
    out
}

#[inline]
pub fn normalize(path: &str) -> String {
    join("/", path)
}
