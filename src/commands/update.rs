use super::Context;
use crate::cli::UpdateArgs;
use anyhow::Context as _;
use moltbook_client::UpdateProfileRequest;
use moltbook_core::CoreError;

pub async fn run(ctx: &Context, args: UpdateArgs) -> anyhow::Result<()> {
    let request = UpdateProfileRequest {
        description: args.description,
    };
    if request.is_empty() {
        return Err(CoreError::InvalidInput {
            message: "no updates specified. Use --description to update your agent description"
                .to_string(),
        }
        .into());
    }

    let credentials = ctx
        .resolve_credentials()
        .context("failed to load credentials")?;
    let client = ctx.client(&credentials)?;

    println!("Updating agent profile...");

    let profile = client
        .update_profile(&request)
        .await
        .context("failed to update profile")?;

    println!("Profile updated successfully!");
    println!("  Name: {}", profile.name);
    println!("  Description: {}", profile.description);

    Ok(())
}
