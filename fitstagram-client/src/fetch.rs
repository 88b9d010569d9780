use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    api::{self, Comment, PostId},
    store::WeakStore,
    ClientConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed talking to the server")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {status}")]
    Status {
        status: reqwest::StatusCode,
        /// Error payload, if the body held one
        error: Option<api::Error>,
    },

    #[error("server sent a malformed comment list")]
    Decode(#[from] serde_json::Error),
}

/// Anything able to list the comments of a post
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, FetchError>;
}

#[async_trait]
impl<S: CommentSource + ?Sized> CommentSource for Arc<S> {
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, FetchError> {
        (**self).fetch_comments(post).await
    }
}

/// Lists comments from the feed API over HTTP
#[derive(Clone, Debug)]
pub struct FetchClient {
    client: reqwest::Client,
    host: String,
}

impl FetchClient {
    pub fn new(config: &ClientConfig) -> Result<FetchClient, FetchError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(FetchClient::with_client(client, config.host.clone()))
    }

    pub fn with_client(client: reqwest::Client, host: String) -> FetchClient {
        FetchClient { client, host }
    }

    pub fn comments_url(&self, post: &PostId) -> String {
        format!("{}{}", self.host, api::comments_path(post))
    }
}

#[async_trait]
impl CommentSource for FetchClient {
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, FetchError> {
        let url = self.comments_url(post);
        tracing::debug!(%url, "fetching comments");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                error: api::Error::parse(&body).ok(),
            });
        }
        let comments: Vec<Comment> = serde_json::from_slice(&body)?;
        tracing::debug!(%url, num_comments = comments.len(), "fetched comments");
        Ok(comments)
    }
}

/// Progress of the comment fetch of one activation
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FetchState {
    Idle,
    Requesting,
    Succeeded { comments: usize },
    /// Fetched fine, but the store was gone by then
    Discarded { comments: usize },
    Failed { reason: String },
}

impl FetchState {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            FetchState::Succeeded { .. } | FetchState::Discarded { .. } | FetchState::Failed { .. }
        )
    }
}

/// The one fetch a post detail runs when it becomes active
///
/// Running consumes the loader: there is no retry. Each loader tracks its
/// own state.
#[must_use = "a loader does nothing until it is run"]
#[derive(Debug)]
pub struct CommentsLoader {
    post: PostId,
    store: WeakStore,
    state: Arc<Mutex<FetchState>>,
}

impl CommentsLoader {
    pub(crate) fn new(post: PostId, store: WeakStore) -> Self {
        CommentsLoader {
            post,
            store,
            state: Arc::new(Mutex::new(FetchState::Idle)),
        }
    }

    pub fn post(&self) -> &PostId {
        &self.post
    }

    pub fn state(&self) -> FetchState {
        self.state.lock().clone()
    }

    pub(crate) fn state_handle(&self) -> Arc<Mutex<FetchState>> {
        self.state.clone()
    }

    /// Fetch the comments and replace the store with them
    ///
    /// Failures are logged and leave the store untouched. If the store was
    /// dropped in the meantime, the result is discarded.
    pub async fn run<S: CommentSource + ?Sized>(self, source: &S) -> FetchState {
        *self.state.lock() = FetchState::Requesting;
        let state = match source.fetch_comments(&self.post).await {
            Ok(comments) => {
                let num = comments.len();
                match self.store.replace_all(comments) {
                    true => FetchState::Succeeded { comments: num },
                    false => FetchState::Discarded { comments: num },
                }
            }
            Err(err) => {
                tracing::warn!(post = %self.post, ?err, "failed fetching comments");
                FetchState::Failed {
                    reason: format!("{:#}", anyhow::Error::new(err)),
                }
            }
        };
        *self.state.lock() = state.clone();
        state
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use fitstagram_mock_server::{Failure, MockServer};

    use super::*;
    use crate::{
        api::{fixtures, User},
        store::SharedStore,
        CommentExt,
    };

    fn init_tracing() {
        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init();
        }
    }

    fn client_for(host: String) -> FetchClient {
        FetchClient::new(&ClientConfig::new(host)).expect("building http client")
    }

    fn post_1() -> PostId {
        fixtures::post().id
    }

    fn loader(store: &SharedStore) -> (CommentsLoader, Arc<Mutex<FetchState>>) {
        let loader = CommentsLoader::new(post_1(), store.downgrade());
        let state = loader.state_handle();
        (loader, state)
    }

    fn failure_reason(state: FetchState) -> String {
        match state {
            FetchState::Failed { reason } => reason,
            state => panic!("expected a failure, got {state:?}"),
        }
    }

    #[test]
    fn url_is_built_from_host_and_post() {
        let c = client_for(String::from("https://example.org/"));
        assert_eq!(
            c.comments_url(&PostId(String::from("9"))),
            "https://example.org/api/feed/9/comments"
        );
    }

    #[tokio::test]
    async fn fetches_fixture_comments() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        let comments = client_for(server.host())
            .fetch_comments(&post_1())
            .await
            .unwrap();
        assert_eq!(comments, fixtures::comments());
        assert_eq!(server.hits(&post_1()), 1);
    }

    #[tokio::test]
    async fn unknown_post_carries_server_error() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        let missing = PostId(String::from("404"));
        match client_for(server.host()).fetch_comments(&missing).await {
            Err(FetchError::Status { status, error }) => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(error, Some(api::Error::PostNotFound(missing)));
            }
            res => panic!("unexpected result {res:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_leaves_store_untouched() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        server.fail_with(Failure::Status(500));
        let store = SharedStore::new();
        let local = Comment::compose(User::me(), String::from("first!"));
        store.lock().append(local.clone());
        let (loader, state) = loader(&store);
        let res = loader.run(&client_for(server.host())).await;
        assert!(matches!(res, FetchState::Failed { .. }));
        assert_eq!(*state.lock(), res);
        assert_eq!(store.snapshot(), vec![local]);
    }

    #[tokio::test]
    async fn malformed_body_is_a_recoverable_decode_error() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        server.fail_with(Failure::MalformedBody);
        let res = client_for(server.host()).fetch_comments(&post_1()).await;
        assert!(matches!(res, Err(FetchError::Decode(_))), "{res:?}");

        let store = SharedStore::new();
        let (loader, _) = loader(&store);
        let reason = failure_reason(loader.run(&client_for(server.host())).await);
        assert!(
            reason.starts_with("server sent a malformed comment list: "),
            "{reason}"
        );
        assert!(reason.contains("EOF"), "{reason}");
        assert!(store.lock().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        init_tracing();
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let res = client_for(format!("http://{addr}"))
            .fetch_comments(&post_1())
            .await;
        assert!(matches!(res, Err(FetchError::Transport(_))), "{res:?}");

        let store = SharedStore::new();
        let (loader, _) = loader(&store);
        let reason = failure_reason(loader.run(&client_for(format!("http://{addr}"))).await);
        assert!(reason.starts_with("failed talking to the server: "), "{reason}");
        assert!(reason.len() > "failed talking to the server: ".len());
    }

    #[tokio::test]
    async fn result_for_dropped_store_is_reported_as_discarded() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        let store = SharedStore::new();
        let (loader, state) = loader(&store);
        drop(store);
        let res = loader.run(&client_for(server.host())).await;
        assert_eq!(res, FetchState::Discarded { comments: 4 });
        assert!(res.is_finished());
        assert_eq!(*state.lock(), res);
    }

    #[tokio::test]
    async fn success_replaces_store_once() {
        init_tracing();
        let server = MockServer::with_fixtures().spawn().await.unwrap();
        let store = SharedStore::new();
        let (loader, state) = loader(&store);
        assert_eq!(*state.lock(), FetchState::Idle);
        let res = loader.run(&client_for(server.host())).await;
        assert_eq!(res, FetchState::Succeeded { comments: 4 });
        assert!(res.is_finished());
        assert_eq!(store.snapshot(), fixtures::comments());
        assert_eq!(server.hits(&post_1()), 1);
    }

    #[tokio::test]
    async fn empty_listing_overwrites_local_comments() {
        init_tracing();
        let server = MockServer::new();
        server.set_comments(post_1(), vec![]);
        let server = server.spawn().await.unwrap();
        let store = SharedStore::new();
        store
            .lock()
            .append(Comment::compose(User::me(), String::from("local")));
        let (loader, _) = loader(&store);
        loader.run(&client_for(server.host())).await;
        assert!(store.lock().is_empty());
    }
}
