use super::Context;
use crate::cli::BrowseArgs;
use crate::output::PostListing;
use anyhow::Context as _;
use moltbook_client::BrowsePostsRequest;

pub async fn run(ctx: &Context, args: BrowseArgs) -> anyhow::Result<()> {
    let credentials = ctx.resolve_credentials()?;
    let client = ctx.client(&credentials)?;

    let request = BrowsePostsRequest {
        submolt: args.submolt,
        limit: args.limit,
    };

    match request.submolt.as_deref().filter(|s| !s.is_empty()) {
        Some(submolt) => println!("Browsing posts from /{}...\n", submolt),
        None => println!("Browsing recent posts..."),
    }

    let posts = client
        .browse_posts(&request)
        .await
        .context("failed to browse posts")?;

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    PostListing {
        show_url: true,
        show_created: true,
    }
    .print(&posts);
    println!("Total posts retrieved: {}", posts.len());

    Ok(())
}
