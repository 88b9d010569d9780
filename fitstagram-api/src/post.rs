use std::fmt;

use crate::User;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub author: User,

    /// Image URLs, in display order
    pub photos: Vec<String>,

    /// Number of likes on the post itself
    pub likes: u64,

    /// Caption
    pub text: String,
}

impl Post {
    /// Path of the comment listing for this post, relative to the API host
    pub fn comments_path(&self) -> String {
        comments_path(&self.id)
    }
}

pub fn comments_path(post: &PostId) -> String {
    format!("/api/feed/{}/comments", post)
}
