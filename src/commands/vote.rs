use super::Context;
use crate::cli::VoteArgs;
use anyhow::Context as _;
use moltbook_client::VoteRequest;

pub async fn run(ctx: &Context, args: VoteArgs) -> anyhow::Result<()> {
    let credentials = ctx.resolve_credentials()?;
    let client = ctx.client(&credentials)?;

    let request = VoteRequest::new(args.target.into(), args.id, args.direction.into());
    client.vote(&request).await.context("failed to vote")?;

    println!(
        "Voted {} on {} {}",
        request.direction, request.target_type, request.target_id
    );
    Ok(())
}
