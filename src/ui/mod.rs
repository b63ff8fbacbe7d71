//! Console rendering for ghpeek
//!
//! Everything writes to a caller-supplied `Write` so the menu loop can be
//! driven against in-memory buffers in tests.

pub mod style;
pub mod summary;

pub use style::paint;

pub use summary::{
    render_error, render_profile, render_repository_search, render_snapshot, render_state,
    render_top_repositories, render_user_search,
};
