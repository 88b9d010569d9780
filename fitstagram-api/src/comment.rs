use std::fmt;

use crate::User;

/// Identifier of a comment, as sent by the server or synthesized locally
///
/// Not unique: several comments may share the same id.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub String);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    pub author: User,

    /// Users who liked this comment, in display order
    pub likes: Vec<User>,

    pub text: String,
}

impl Comment {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author == *user
    }
}
