#![cfg(test)]

use crate::{
    api::{fixtures, Comment},
    CommentStore,
};

/// Small palette so that duplicates and shared ids show up often
fn palette(i: u8) -> Comment {
    let comments = fixtures::comments();
    comments[usize::from(i) % comments.len()].clone()
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum StoreOp {
    Append(u8),
    Remove(u8),
    ReplaceAll(Vec<u8>),
}

#[test]
fn fuzz_store_matches_vec_model() {
    bolero::check!()
        .with_type::<Vec<StoreOp>>()
        .cloned()
        .for_each(|ops| {
            let mut store = CommentStore::new();
            let mut model: Vec<Comment> = Vec::new();
            for op in ops {
                match op {
                    StoreOp::Append(i) => {
                        store.append(palette(i));
                        model.push(palette(i));
                    }
                    StoreOp::Remove(i) => {
                        let target = palette(i);
                        let expected = model.iter().filter(|c| **c == target).count();
                        model.retain(|c| *c != target);
                        assert_eq!(store.remove_matching(&target), expected);
                        assert!(store.iter().all(|c| *c != target));
                    }
                    StoreOp::ReplaceAll(is) => {
                        let comments = is.into_iter().map(palette).collect::<Vec<_>>();
                        store.replace_all(comments.clone());
                        model = comments;
                    }
                }
                assert_eq!(store.comments(), model.as_slice());
            }
        })
}

#[test]
fn fuzz_appends_keep_call_order() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .cloned()
        .for_each(|is| {
            let mut store = CommentStore::new();
            for i in &is {
                store.append(palette(*i));
            }
            let expected = is.into_iter().map(palette).collect::<Vec<_>>();
            assert_eq!(store.comments(), expected.as_slice());
        })
}
