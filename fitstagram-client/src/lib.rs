mod comment;
pub use comment::{local_comment_id, CommentExt};

mod config;
pub use config::{ClientConfig, DEFAULT_HOST, HOST_VAR, TIMEOUT_VAR};

mod fetch;
pub use fetch::{CommentSource, CommentsLoader, FetchClient, FetchError, FetchState};

mod fuzz;

mod post_detail;
pub use post_detail::{CommentRow, PhotoLayout, PostDetail};

mod store;
pub use store::{CommentStore, SharedStore, WeakStore};

pub mod api {
    pub use fitstagram_api::*;
}

pub mod prelude {
    pub use crate::{CommentExt, CommentSource};
}
