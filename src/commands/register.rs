use super::Context;
use crate::cli::RegisterArgs;
use anyhow::Context as _;
use moltbook_client::register_with;
use moltbook_core::{write_env_file, CoreError, Credentials, API_KEY_ENV, AGENT_NAME_ENV};
use std::path::Path;

const ENV_FILE: &str = ".env";

pub async fn run(ctx: &Context, args: RegisterArgs) -> anyhow::Result<()> {
    println!("Registering agent '{}'...", args.name);

    let result = register_with(&ctx.client_config(""), &args.name, &args.description)
        .await
        .context("registration failed")?;

    println!("Registration successful!");
    if !result.agent_id.is_empty() {
        println!("  Agent ID: {}", result.agent_id);
    }
    let credentials = result.credentials(&args.name);
    println!("  API Key: {}", credentials.key_preview(20));

    if args.export {
        println!("\n# Add these to your shell profile (~/.bashrc, ~/.zshrc, etc.):");
        print_exports(&credentials, "");
        return Ok(());
    }

    if args.env_file {
        write_env_file(Path::new(ENV_FILE), &credentials)
            .map_err(CoreError::from)
            .context("failed to write .env file")?;
        println!("\nCredentials saved to {}", ENV_FILE);
        println!("\n  To use: source {}", ENV_FILE);
    } else {
        ctx.store
            .save_credentials(&credentials)
            .map_err(CoreError::from)
            .context("failed to save credentials")?;
        println!(
            "\nCredentials saved to {}",
            ctx.store.credentials_path().display()
        );
        println!("\n  Or set as environment variables:");
        print_exports(&credentials, "    ");
    }

    println!("\nIMPORTANT: Share this claim URL with your human:");
    println!("  {}", result.claim_url);
    println!("\n  Verification code: {}", result.verification_code);
    match result.tweet_template.as_deref() {
        Some(template) => println!("\n  Tweet this to verify ownership:\n  {}", template),
        None => println!("\n  Tweet this URL to verify ownership of your agent!"),
    }

    Ok(())
}

fn print_exports(credentials: &Credentials, indent: &str) {
    println!("{}export {}=\"{}\"", indent, API_KEY_ENV, credentials.api_key);
    println!("{}export {}=\"{}\"", indent, AGENT_NAME_ENV, credentials.agent_name);
}
