use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};

use crate::api::Comment;

/// Ordered list of the comments displayed for one post
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentStore {
    comments: Vec<Comment>,
}

impl CommentStore {
    pub fn new() -> CommentStore {
        CommentStore::default()
    }

    /// Replace the whole contents with `comments`, as-is
    pub fn replace_all(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
    }

    pub fn append(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Remove every comment structurally equal to `comment`, returning how many were removed
    ///
    /// Comment ids are not unique, so this may remove more than the one comment
    /// the user pointed at if identical copies are displayed.
    pub fn remove_matching(&mut self, comment: &Comment) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| c != comment);
        before - self.comments.len()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Owning handle on a comment store
#[derive(Clone, Debug, Default)]
pub struct SharedStore(Arc<Mutex<CommentStore>>);

impl SharedStore {
    pub fn new() -> SharedStore {
        SharedStore::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, CommentStore> {
        self.0.lock()
    }

    pub fn snapshot(&self) -> Vec<Comment> {
        self.0.lock().comments().to_vec()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore(Arc::downgrade(&self.0))
    }
}

/// Handle held by background work that must not keep the store alive
#[derive(Clone, Debug)]
pub struct WeakStore(Weak<Mutex<CommentStore>>);

impl WeakStore {
    /// Returns `false` if the store was already dropped, in which case nothing happens
    pub fn replace_all(&self, comments: Vec<Comment>) -> bool {
        match self.0.upgrade() {
            Some(store) => {
                store.lock().replace_all(comments);
                true
            }
            None => {
                tracing::debug!(
                    num_comments = comments.len(),
                    "dropping comments for a store that no longer exists"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fixtures, CommentId, User};

    fn comment(id: &str, text: &str) -> Comment {
        Comment {
            id: CommentId(String::from(id)),
            author: User::me(),
            likes: vec![],
            text: String::from(text),
        }
    }

    #[test]
    fn append_keeps_call_order_and_duplicates() {
        let mut s = CommentStore::new();
        let (a, b) = (comment("1", "a"), comment("2", "b"));
        s.append(a.clone());
        s.append(b.clone());
        s.append(a.clone());
        assert_eq!(s.comments(), &[a.clone(), b, a]);
    }

    #[test]
    fn append_accepts_empty_text() {
        let mut s = CommentStore::new();
        s.append(comment("1", ""));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_first_of_two() {
        let mut s = CommentStore::new();
        let (a, b) = (comment("1", "a"), comment("2", "b"));
        s.append(a.clone());
        s.append(b.clone());
        assert_eq!(s.remove_matching(&a), 1);
        assert_eq!(s.comments(), &[b]);
    }

    #[test]
    fn remove_takes_every_structural_copy() {
        let mut s = CommentStore::new();
        let c1 = fixtures::comment_2();
        s.replace_all(vec![c1.clone(), c1.clone()]);
        assert_eq!(s.remove_matching(&c1), 2);
        assert!(s.is_empty());
    }

    #[test]
    fn remove_ignores_same_id_with_other_fields() {
        let mut s = CommentStore::new();
        s.replace_all(fixtures::comments());
        assert_eq!(s.remove_matching(&fixtures::comment_1()), 1);
        assert_eq!(
            s.comments(),
            &[
                fixtures::comment_2(),
                fixtures::comment_3(),
                fixtures::comment_4()
            ]
        );
        assert_eq!(s.remove_matching(&fixtures::comment_1()), 0);
    }

    #[test]
    fn replace_all_discards_local_edits() {
        let mut s = CommentStore::new();
        s.append(comment("x", "local"));
        s.replace_all(fixtures::comments());
        assert_eq!(s.comments(), fixtures::comments().as_slice());
        s.replace_all(vec![]);
        assert!(s.is_empty());
    }

    #[test]
    fn weak_store_writes_until_dropped() {
        let store = SharedStore::new();
        let weak = store.downgrade();
        assert!(weak.replace_all(fixtures::comments()));
        assert_eq!(store.lock().len(), 4);
        drop(store);
        assert!(!weak.replace_all(fixtures::comments()));
    }
}
