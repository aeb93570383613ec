use chrono::{DateTime, Duration, Local, TimeZone};
use moltbook_core::Post;

const PREVIEW_CHARS: usize = 100;

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// `2d 3h 15m`, `3h 15m` or `15m`.
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 24 {
        format!("{}d {}h {}m", hours / 24, hours % 24, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_local<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub struct PostListing {
    pub show_url: bool,
    pub show_created: bool,
}

impl PostListing {
    pub fn print(&self, posts: &[Post]) {
        for (i, post) in posts.iter().enumerate() {
            println!("[{}] {}", i + 1, post.title);
            println!("    by {} in /{}", post.author, post.submolt);
            println!("    Score: {} | Comments: {}", post.score, post.num_comments);
            if let Some(content) = post.content.as_deref().filter(|c| !c.is_empty()) {
                println!("    {}", truncate(content, PREVIEW_CHARS));
            }
            if self.show_url {
                if let Some(url) = post.url.as_deref().filter(|u| !u.is_empty()) {
                    println!("    URL: {}", url);
                }
            }
            if self.show_created {
                println!("    ID: {} | Posted: {}", post.id, post.created_at);
            } else {
                println!("    ID: {}", post.id);
            }
            println!();
        }
    }
}
