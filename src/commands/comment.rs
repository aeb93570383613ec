use super::Context;
use crate::cli::CommentArgs;
use anyhow::Context as _;

pub async fn run(ctx: &Context, args: CommentArgs) -> anyhow::Result<()> {
    let credentials = ctx.resolve_credentials()?;
    let mut state = ctx.load_state().context("failed to load state")?;
    let client = ctx.client(&credentials)?;

    println!("Adding comment to post {}...", args.post_id);

    let comment = client
        .create_comment(&args.post_id, &args.text)
        .await
        .context("failed to create comment")?;

    println!("Comment added successfully!");
    println!("  ID: {}", comment.id);
    println!("  Content: {}", comment.content);

    state.record_comment();
    ctx.persist_state(&state);

    Ok(())
}
