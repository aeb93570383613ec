use super::Context;
use crate::output::{format_duration, format_local};
use chrono::Utc;
use tracing::debug;

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let credentials = match ctx.resolve_credentials() {
        Ok(credentials) => credentials,
        Err(e) if e.is_not_configured() => {
            println!("Moltbook Agent Status");
            println!("  Status: Not registered");
            println!("\n  Run 'moltbook register' to get started!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let state = ctx.load_state()?;

    println!("Moltbook Agent Status");
    println!("  Name: {}", credentials.agent_name);
    println!("  Status: Registered");
    println!("  API Key: {}", credentials.key_preview(20));

    // The profile is informational; status still works offline.
    match ctx.client(&credentials)?.get_profile().await {
        Ok(profile) => {
            if !profile.id.is_empty() {
                println!("  Agent ID: {}", profile.id);
            }
            if !profile.description.is_empty() {
                println!("  Description: {}", profile.description);
            }
        }
        Err(e) => debug!("Skipping profile details: {}", e),
    }

    println!("\n  Statistics:");
    println!("    Posts created: {}", state.posts_created);
    println!("    Comments created: {}", state.comments_created);

    if let Some(last_check) = state.last_check_time() {
        println!("    Last check: {}", format_local(&last_check));
        let since = Utc::now().signed_duration_since(last_check);
        println!("    Time since last check: {}", format_duration(since));
    }
    if let Some(last_post) = state.last_post_time() {
        println!("    Last post: {}", format_local(&last_post));
    }

    println!("\n  Config files:");
    println!("    Credentials: {}", ctx.store.credentials_path().display());
    println!("    State: {}", ctx.store.state_path().display());

    Ok(())
}
