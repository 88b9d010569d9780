use std::{
    collections::{BTreeMap, HashMap},
    net::{SocketAddr, TcpListener},
    ops::Deref,
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use fitstagram_api::{fixtures, Comment, Error, PostId};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Body served by [`Failure::MalformedBody`]: valid HTTP, truncated JSON
pub const MALFORMED_BODY: &str = r#"[{"id": "1", "author": {"id": "#;

/// Way the comments endpoint misbehaves, for every post, until cleared
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Failure {
    Status(u16),
    MalformedBody,
}

/// In-memory stand-in for the feed API
#[derive(Clone, Debug, Default)]
pub struct MockServer(Arc<Mutex<Db>>);

#[derive(Debug, Default)]
struct Db {
    comments: BTreeMap<PostId, Vec<Comment>>,
    failure: Option<Failure>,
    hits: HashMap<PostId, usize>,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    /// Server knowing the sample post and its comments
    pub fn with_fixtures() -> MockServer {
        let server = MockServer::new();
        server.set_comments(fixtures::post().id, fixtures::comments());
        server.set_comments(fixtures::single_photo_post().id, vec![fixtures::comment_3()]);
        server
    }

    pub fn set_comments(&self, post: PostId, comments: Vec<Comment>) {
        self.0.lock().comments.insert(post, comments);
    }

    pub fn fail_with(&self, failure: Failure) {
        self.0.lock().failure = Some(failure);
    }

    pub fn clear_failure(&self) {
        self.0.lock().failure = None;
    }

    /// Number of comment listings requested for `post`, failed ones included
    pub fn hits(&self, post: &PostId) -> usize {
        self.0.lock().hits.get(post).copied().unwrap_or(0)
    }

    pub fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, Error> {
        self.0
            .lock()
            .comments
            .get(post)
            .cloned()
            .ok_or_else(|| Error::PostNotFound(post.clone()))
    }

    fn respond_comments(&self, post: PostId) -> Response {
        let failure = {
            let mut db = self.0.lock();
            *db.hits.entry(post.clone()).or_insert(0) += 1;
            db.failure
        };
        match failure {
            Some(Failure::Status(code)) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Some(Failure::MalformedBody) => (
                [(header::CONTENT_TYPE, "application/json")],
                MALFORMED_BODY,
            )
                .into_response(),
            None => match self.fetch_comments(&post) {
                Ok(comments) => axum::Json(comments).into_response(),
                Err(err) => {
                    tracing::info!("returning error to client: {err}");
                    (err.status_code(), err.contents()).into_response()
                }
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/feed/:post_id/comments", get(fetch_comments))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port of the loopback interface
    pub async fn spawn(self) -> anyhow::Result<RunningMockServer> {
        self.spawn_on(SocketAddr::from(([127, 0, 0, 1], 0))).await
    }

    pub async fn spawn_on(self, addr: SocketAddr) -> anyhow::Result<RunningMockServer> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let app = self.router();
        let server = axum::Server::from_tcp(listener)?.serve(app.into_make_service());
        tracing::info!("mock server listening on {}", addr);
        let task = tokio::spawn(async move {
            if let Err(err) = server.await {
                tracing::error!(?err, "mock server stopped");
            }
        });
        Ok(RunningMockServer {
            server: self,
            addr,
            task,
        })
    }
}

async fn fetch_comments(State(server): State<MockServer>, Path(post): Path<String>) -> Response {
    server.respond_comments(PostId(post))
}

/// A mock server bound to a socket, shut down when dropped
pub struct RunningMockServer {
    server: MockServer,
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl RunningMockServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve until the server task stops
    pub async fn wait(mut self) -> anyhow::Result<()> {
        (&mut self.task).await?;
        Ok(())
    }
}

impl Deref for RunningMockServer {
    type Target = MockServer;

    fn deref(&self) -> &MockServer {
        &self.server
    }
}

impl Drop for RunningMockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
