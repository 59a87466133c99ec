use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use herald::config::parse_machine_users;
use herald::github::api::{create_github_client, GithubRepositoryClient};
use herald::github::payload::parse_trigger_event;
use herald::github::GithubRepoName;
use herald::mention::{handle_pull_request_activity, MentionContext};

#[derive(clap::Parser)]
struct Opts {
    /// Token used to authenticate to the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Repository on which the event has occurred, in the `<owner>/<name>` format.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: GithubRepoName,

    /// Name of the event that triggered this run.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON payload of the trigger event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Username of the user that triggered the event.
    #[arg(long, env = "GITHUB_ACTOR")]
    actor: String,

    /// Machine users that should never be mentioned, one username per line.
    /// Lines starting with `#` are treated as comments.
    #[arg(long, env = "INPUT_MACHINE_USERS", default_value = "")]
    machine_users: String,
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let payload = std::fs::read(&opts.event_path).with_context(|| {
        format!(
            "Cannot read event payload from {}",
            opts.event_path.display()
        )
    })?;
    let Some(event) = parse_trigger_event(&payload)? else {
        tracing::info!(
            "Event {} does not belong to a pull request, nothing to do",
            opts.event_name
        );
        return Ok(());
    };

    let ctx = MentionContext {
        event_name: opts.event_name,
        event_action: event.action,
        pr_merged: event.pr_merged,
        review_state: event.review_state,
        actor: opts.actor,
        machine_users: parse_machine_users(&opts.machine_users),
    };
    tracing::debug!("Context: {ctx:?}");

    let client = create_github_client(opts.token)?;
    let client = GithubRepositoryClient::new(client, opts.repository);
    handle_pull_request_activity(&client, &ctx, event.pr_number).await
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;
    runtime.block_on(run(opts))
}

fn main() {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
