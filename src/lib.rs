//! A hierarchical state router.
//!
//! Paths are matched segment by segment against a tree of [`State`]s. Moving
//! from one path to another closes the states that no longer apply and opens
//! the new ones, running their lifecycle handlers strictly in order, while a
//! [`History`] is kept pointing at the active path.
//!
//! ```
//! use std::sync::Arc;
//! use rose_router::{Handler, MemoryHistory, Router};
//!
//! let router = Router::new(Arc::new(MemoryHistory::default()), None).unwrap();
//! let photo = router
//!     .root()
//!     .open("albums/page:number/photo:number", [Handler::sync(|state| {
//!         let params = state.params().expect("open runs on an active state");
//!         assert_eq!(params.get("number"), Some("5"));
//!         Ok(())
//!     })])
//!     .unwrap();
//!
//! futures::executor::block_on(router.navigate("albums/page1/photo5")).unwrap();
//! assert_eq!(photo.path().as_deref(), Some("/albums/page1/photo5"));
//! ```

pub mod errors;
pub mod events;
pub mod history;
pub mod navigation;
pub mod path;
pub mod pattern;
pub mod router;
pub mod state;

pub use errors::{RouterError, RouterResult};
pub use events::{Completion, Handler, HandlerError, HandlerKind, HandlerResult, Sequencer};
pub use history::{History, MemoryHistory};
pub use navigation::{NavigationError, NavigationResult};
pub use pattern::{Captures, Matcher, PatternError, compile, compile_with};
pub use router::{LinkClick, Router, RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use state::{Params, State};
