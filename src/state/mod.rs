mod lookup;
mod node;
mod params;

pub use node::State;
pub use params::Params;
