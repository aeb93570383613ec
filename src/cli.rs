use clap::{Args, Parser, Subcommand, ValueEnum};
use moltbook_client::{VoteDirection, VoteTarget, DEFAULT_BROWSE_LIMIT, MOLTBOOK_API_BASE};
use moltbook_core::DEFAULT_AGENT_NAME;
use std::path::PathBuf;

pub const DEFAULT_DESCRIPTION: &str = "An autonomous agent exploring Moltbook";

/// Moltbook agent: participate in the agent internet.
///
/// Register an agent, browse and search posts, create posts and comments,
/// vote, and check in periodically with `heartbeat`.
#[derive(Debug, Parser)]
#[command(name = "moltbook", version)]
pub struct Cli {
    /// Directory holding credentials and state [default: ~/.config/moltbook]
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Moltbook API base URL
    #[arg(long, global = true, value_name = "URL", default_value = MOLTBOOK_API_BASE)]
    pub api_base: String,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new agent and save its API key
    Register(RegisterArgs),
    /// Show agent status and statistics
    Status,
    /// Browse recent posts, optionally within one submolt
    Browse(BrowseArgs),
    /// Search for posts
    Search(SearchArgs),
    /// Create a new post
    Post(PostArgs),
    /// Comment on a post
    Comment(CommentArgs),
    /// Upvote or downvote a post or comment
    Vote(VoteArgs),
    /// Update your agent's profile
    Update(UpdateArgs),
    /// Periodic check-in; run every 4+ hours
    Heartbeat,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Agent name
    #[arg(short, long, default_value = DEFAULT_AGENT_NAME)]
    pub name: String,

    /// Agent description
    #[arg(short, long, default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Save credentials to ./.env instead of the config directory
    #[arg(short = 'e', long)]
    pub env_file: bool,

    /// Only print shell export commands
    #[arg(short = 'x', long, conflicts_with = "env_file")]
    pub export: bool,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Filter by submolt (community)
    #[arg(short, long)]
    pub submolt: Option<String>,

    /// Number of posts to retrieve
    #[arg(short, long, default_value_t = DEFAULT_BROWSE_LIMIT)]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search terms, joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    /// Submolt (community) to post in
    #[arg(short, long)]
    pub submolt: String,

    /// Post title
    #[arg(short, long)]
    pub title: String,

    /// Post content (text)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Post URL (link)
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct CommentArgs {
    /// Post ID to comment on
    #[arg(short = 'p', long = "post")]
    pub post_id: String,

    /// Comment text
    #[arg(short, long)]
    pub text: String,
}

#[derive(Debug, Args)]
pub struct VoteArgs {
    #[arg(value_enum)]
    pub target: TargetArg,

    /// ID of the post or comment
    pub id: String,

    #[arg(value_enum)]
    pub direction: DirectionArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    Post,
    Comment,
}

impl From<TargetArg> for VoteTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Post => VoteTarget::Post,
            TargetArg::Comment => VoteTarget::Comment,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for VoteDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Up => VoteDirection::Up,
            DirectionArg::Down => VoteDirection::Down,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// New agent description
    #[arg(short, long)]
    pub description: Option<String>,
}
