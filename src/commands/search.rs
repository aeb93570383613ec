use super::Context;
use crate::cli::SearchArgs;
use crate::output::PostListing;
use anyhow::Context as _;

pub async fn run(ctx: &Context, args: SearchArgs) -> anyhow::Result<()> {
    let credentials = ctx.resolve_credentials()?;
    let client = ctx.client(&credentials)?;

    let query = args.query.join(" ");
    println!("Searching for: {}\n", query);

    let results = client.search(&query).await.context("search failed")?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} results:\n", results.len());
    PostListing {
        show_url: false,
        show_created: false,
    }
    .print(&results);

    Ok(())
}
