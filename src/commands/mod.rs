mod browse;
mod comment;
mod heartbeat;
mod post;
mod register;
mod search;
mod status;
mod update;
mod vote;

use crate::cli::{Cli, Command};
use moltbook_client::{ClientConfig, MoltbookClient};
use moltbook_core::{
    ConfigStore, CoreError, Credentials, EnvCredentials, ErrorReporter, UsageState,
};
use tracing::debug;

/// Everything a command needs: where state lives and which API to talk to.
pub struct Context {
    pub store: ConfigStore,
    api_base: String,
    reporter: ErrorReporter,
}

impl Context {
    pub fn new(store: ConfigStore, api_base: impl Into<String>) -> Self {
        Self {
            store,
            api_base: api_base.into(),
            reporter: ErrorReporter::new(),
        }
    }

    pub fn resolve_credentials(&self) -> Result<Credentials, CoreError> {
        let credentials = self
            .store
            .resolve_credentials(&EnvCredentials::from_process())?;
        debug!("Using credentials for agent {}", credentials.agent_name);
        Ok(credentials)
    }

    pub fn client_config(&self, api_key: &str) -> ClientConfig {
        ClientConfig::new(api_key).with_base_url(self.api_base.as_str())
    }

    pub fn client(&self, credentials: &Credentials) -> Result<MoltbookClient, CoreError> {
        MoltbookClient::with_config(self.client_config(&credentials.api_key))
    }

    pub fn load_state(&self) -> Result<UsageState, CoreError> {
        Ok(self.store.load_state()?)
    }

    /// Saves state after a remote action already succeeded. Failure is only a
    /// warning: the remote action stays committed.
    pub fn persist_state(&self, state: &UsageState) -> bool {
        match self.store.save_state(state) {
            Ok(()) => true,
            Err(e) => {
                let error = CoreError::from(e);
                self.reporter.report_warning(&error);
                eprintln!("Warning: failed to save state: {}", error);
                false
            }
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = match cli.config_dir {
        Some(dir) => ConfigStore::new(dir),
        None => ConfigStore::from_home().map_err(CoreError::from)?,
    };
    let ctx = Context::new(store, cli.api_base);

    match cli.command {
        Command::Register(args) => register::run(&ctx, args).await,
        Command::Status => status::run(&ctx).await,
        Command::Browse(args) => browse::run(&ctx, args).await,
        Command::Search(args) => search::run(&ctx, args).await,
        Command::Post(args) => post::run(&ctx, args).await,
        Command::Comment(args) => comment::run(&ctx, args).await,
        Command::Vote(args) => vote::run(&ctx, args).await,
        Command::Update(args) => update::run(&ctx, args).await,
        Command::Heartbeat => heartbeat::run(&ctx).await,
    }
}
