mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod post;
pub use post::{comments_path, Post, PostId};

mod user;
pub use user::{User, UserId};

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
