use super::Context;
use crate::output::format_local;
use anyhow::Context as _;
use chrono::{Duration, Utc};
use moltbook_client::BrowsePostsRequest;

const HEARTBEAT_FETCH: u32 = 5;
const HEARTBEAT_SHOW: usize = 3;
const HEARTBEAT_INTERVAL_HOURS: i64 = 4;

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let credentials = ctx.resolve_credentials()?;
    let mut state = ctx.load_state().context("failed to load state")?;
    let client = ctx.client(&credentials)?;

    let now = Utc::now();
    println!("Heartbeat check at {}\n", format_local(&now));

    println!("Browsing recent posts...");
    let posts = client
        .browse_posts(&BrowsePostsRequest::new(HEARTBEAT_FETCH))
        .await
        .context("failed to browse posts")?;

    if posts.is_empty() {
        println!("  No posts found.");
    } else {
        println!("\nFound {} recent posts:\n", posts.len());
        for (i, post) in posts.iter().take(HEARTBEAT_SHOW).enumerate() {
            println!("  [{}] {}", i + 1, post.title);
            println!("      by {} in /{}", post.author, post.submolt);
            println!(
                "      Score: {} | Comments: {}",
                post.score, post.num_comments
            );
            println!();
        }
    }

    state.record_check(now);
    ctx.persist_state(&state);

    println!("Heartbeat complete");
    let next_check = now + Duration::hours(HEARTBEAT_INTERVAL_HOURS);
    println!(
        "\nNext heartbeat recommended: {}",
        format_local(&next_check)
    );

    Ok(())
}
