use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use chrono::Utc;
use rand::Rng;

use crate::api::{Comment, CommentId, User};

pub trait CommentExt {
    /// Build a comment written on this device, not yet known to the server
    fn compose(author: User, text: String) -> Self;
}

impl CommentExt for Comment {
    fn compose(author: User, text: String) -> Comment {
        Comment {
            id: local_comment_id(),
            author,
            likes: Vec::new(),
            text,
        }
    }
}

/// Random number in `1..10000` followed by a hash of the current time
///
/// Collisions are unlikely but possible, which the store tolerates.
pub fn local_comment_id() -> CommentId {
    let prefix: u32 = rand::thread_rng().gen_range(1..10000);
    let mut hasher = DefaultHasher::new();
    Utc::now().hash(&mut hasher);
    CommentId(format!("{}{}", prefix, hasher.finish()))
}
