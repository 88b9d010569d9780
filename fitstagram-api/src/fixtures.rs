//! Sample data for previews, tests and the mock server
//!
//! Every sample comment uses id `"1"`, and `comment_2` and `comment_4` are
//! structurally identical, like the data the real feed used to be demoed with.

use crate::{Comment, CommentId, Post, PostId, User};

pub fn user_1() -> User {
    User::new("1", "rosta")
}

pub fn user_2() -> User {
    User::new("2", "lukas.hromadnik")
}

pub fn user_3() -> User {
    User::new("3", "igor_rosocha")
}

pub fn user_4() -> User {
    User::new("4", "jirka")
}

pub fn user_5() -> User {
    User::new("5", "marek.fort")
}

pub fn users() -> Vec<User> {
    vec![user_1(), user_2(), user_3(), user_4(), user_5()]
}

fn comment(author: User, likes: Vec<User>, text: &str) -> Comment {
    Comment {
        id: CommentId(String::from("1")),
        author,
        likes,
        text: String::from(text),
    }
}

pub fn comment_1() -> Comment {
    comment(
        user_3(),
        vec![user_1(), user_2(), user_4()],
        "Another example comment.",
    )
}

pub fn comment_2() -> Comment {
    comment(
        user_1(),
        vec![user_3(), user_4()],
        "The light on the left side of this shot is just perfect, where was it taken?",
    )
}

pub fn comment_3() -> Comment {
    comment(
        user_5(),
        vec![user_3(), user_4()],
        "A third comment for demonstration.",
    )
}

pub fn comment_4() -> Comment {
    comment_2()
}

pub fn comments() -> Vec<Comment> {
    vec![comment_1(), comment_2(), comment_3(), comment_4()]
}

pub fn post() -> Post {
    Post {
        id: PostId(String::from("1")),
        author: user_1(),
        photos: vec![
            String::from("https://fitstagram.ackee.cz/images/1.jpg"),
            String::from("https://fitstagram.ackee.cz/images/2.jpg"),
        ],
        likes: 42,
        text: String::from("Weekend hike above the clouds"),
    }
}

/// A post with exactly one photo
pub fn single_photo_post() -> Post {
    Post {
        id: PostId(String::from("2")),
        photos: vec![String::from("https://fitstagram.ackee.cz/images/3.jpg")],
        ..post()
    }
}
