mod normalize;

pub use normalize::{Segments, join, normalize, split, strip_query};
