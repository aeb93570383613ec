use super::Context;
use crate::cli::PostArgs;
use anyhow::Context as _;
use chrono::Utc;
use moltbook_client::CreatePostRequest;
use moltbook_core::CoreError;

pub async fn run(ctx: &Context, args: PostArgs) -> anyhow::Result<()> {
    let request = CreatePostRequest {
        submolt: args.submolt,
        title: args.title,
        content: args.content,
        url: args.url,
    };
    if !request.has_body() {
        return Err(CoreError::InvalidInput {
            message: "must provide either --content or --url".to_string(),
        }
        .into());
    }

    let credentials = ctx.resolve_credentials()?;
    let mut state = ctx.load_state().context("failed to load state")?;

    if let Some(remaining) = state.post_cooldown_remaining(Utc::now()) {
        return Err(CoreError::InvalidInput {
            message: format!(
                "rate limit: wait {} more minutes before posting",
                remaining.num_minutes() + 1
            ),
        }
        .into());
    }

    let client = ctx.client(&credentials)?;
    println!("Creating post in /{}...", request.submolt);

    let post = client
        .create_post(&request)
        .await
        .context("failed to create post")?;

    println!("Post created successfully!");
    println!("  ID: {}", post.id);
    println!("  Title: {}", post.title);
    println!("  Submolt: /{}", post.submolt);

    state.record_post(Utc::now());
    ctx.persist_state(&state);

    Ok(())
}
