use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fitstagram_client::{
    api::{Comment, PostId},
    ClientConfig, CommentSource, FetchClient,
};
use fitstagram_mock_server::MockServer;

#[derive(structopt::StructOpt)]
struct Opt {
    /// API host, scheme included, overriding FITSTAGRAM_HOST
    #[structopt(long)]
    host: Option<String>,

    /// Request timeout in seconds, overriding FITSTAGRAM_TIMEOUT_SECS
    #[structopt(long)]
    timeout_secs: Option<u64>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the comments of a post
    Comments {
        /// Post id
        post_id: String,
    },

    /// Serve the sample feed locally
    MockServer {
        #[structopt(short, long, default_value = "3000")]
        port: u16,
    },
}

impl Opt {
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config =
            ClientConfig::from_env().context("reading client configuration from environment")?;
        if let Some(host) = &self.host {
            config = ClientConfig::new(host.clone()).with_timeout(config.timeout);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn format_comment(c: &Comment) -> String {
    format!("{}: {} ({} likes)", c.author.username, c.text, c.likes.len())
}

async fn comment_lines(config: &ClientConfig, post_id: String) -> anyhow::Result<Vec<String>> {
    let client = FetchClient::new(config).context("building http client")?;
    let post = PostId(post_id);
    let comments = client
        .fetch_comments(&post)
        .await
        .with_context(|| format!("fetching comments of post {post} from {}", config.host))?;
    Ok(comments.iter().map(format_comment).collect())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let config = opt.client_config()?;

    match opt.cmd {
        Command::Comments { post_id } => {
            for line in comment_lines(&config, post_id).await? {
                println!("{}", line);
            }
        }
        Command::MockServer { port } => {
            let addr = SocketAddr::from(([127, 0, 0, 1], port));
            MockServer::with_fixtures()
                .spawn_on(addr)
                .await
                .with_context(|| format!("binding mock server to {addr}"))?
                .wait()
                .await
                .context("serving mock server")?;
        }
    }

    Ok(())
}
