use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    api::{Comment, Post, User},
    fetch::{CommentsLoader, FetchState},
    store::SharedStore,
    CommentExt,
};

/// How the photos of a post are laid out
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhotoLayout<'a> {
    None,
    Single(&'a str),
    /// Swipeable pages with an index indicator
    Paged(&'a [String]),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentRow {
    pub comment: Comment,

    /// Whether the current user may delete this comment
    pub deletable: bool,
}

/// State behind the detail screen of one post
///
/// Comments are fetched once per activation, then only edited locally:
/// nothing written here is sent back to the server.
#[derive(Debug)]
pub struct PostDetail {
    post: Post,
    me: User,
    comments: SharedStore,
    fetch_state: Arc<Mutex<FetchState>>,
    is_bookmarked: bool,
    draft: String,
    pending_deletion: Option<Comment>,
}

impl PostDetail {
    pub fn new(post: Post) -> PostDetail {
        PostDetail::with_current_user(post, User::me())
    }

    pub fn with_current_user(post: Post, me: User) -> PostDetail {
        PostDetail {
            post,
            me,
            comments: SharedStore::new(),
            fetch_state: Arc::new(Mutex::new(FetchState::Idle)),
            is_bookmarked: false,
            draft: String::new(),
            pending_deletion: None,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn current_user(&self) -> &User {
        &self.me
    }

    /// Loader to run when the screen becomes active
    ///
    /// It only holds a weak reference to the comments, so it may outlive this
    /// screen without effect. `fetch_state` follows the latest loader only.
    pub fn activate(&mut self) -> CommentsLoader {
        let loader = CommentsLoader::new(self.post.id.clone(), self.comments.downgrade());
        self.fetch_state = loader.state_handle();
        loader
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state.lock().clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.snapshot()
    }

    pub fn comment_rows(&self) -> Vec<CommentRow> {
        self.comments
            .lock()
            .iter()
            .map(|c| CommentRow {
                comment: c.clone(),
                deletable: c.is_authored_by(&self.me),
            })
            .collect()
    }

    pub fn photo_layout(&self) -> PhotoLayout<'_> {
        match self.post.photos.as_slice() {
            [] => PhotoLayout::None,
            [photo] => PhotoLayout::Single(photo),
            photos => PhotoLayout::Paged(photos),
        }
    }

    pub fn is_bookmarked(&self) -> bool {
        self.is_bookmarked
    }

    pub fn toggle_bookmark(&mut self) {
        self.is_bookmarked = !self.is_bookmarked;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Append the draft as a new comment by the current user and clear it
    ///
    /// An empty draft is sent as an empty comment.
    pub fn send_draft(&mut self) -> Comment {
        let text = std::mem::take(&mut self.draft);
        let comment = Comment::compose(self.me.clone(), text);
        self.comments.lock().append(comment.clone());
        comment
    }

    /// Ask for confirmation before deleting `comment`
    ///
    /// Returns `false`, and changes nothing, if the current user did not author it.
    pub fn request_delete(&mut self, comment: &Comment) -> bool {
        if !comment.is_authored_by(&self.me) {
            return false;
        }
        self.pending_deletion = Some(comment.clone());
        true
    }

    pub fn pending_deletion(&self) -> Option<&Comment> {
        self.pending_deletion.as_ref()
    }

    pub fn is_delete_confirmation_presented(&self) -> bool {
        self.pending_deletion.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    /// Delete the comment awaiting confirmation, along with all its identical copies
    pub fn confirm_delete(&mut self) -> usize {
        match self.pending_deletion.take() {
            Some(comment) => self.comments.lock().remove_matching(&comment),
            None => 0,
        }
    }
}
