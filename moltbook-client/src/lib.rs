pub mod api;
pub mod models;
pub mod register;


pub use api::{ClientConfig, MoltbookClient, DEFAULT_TIMEOUT, MOLTBOOK_API_BASE};
pub use models::{
    BrowsePostsRequest, CreatePostRequest, UpdateProfileRequest, VoteDirection, VoteRequest,
    VoteTarget, DEFAULT_BROWSE_LIMIT,
};
pub use register::{register, register_with};
