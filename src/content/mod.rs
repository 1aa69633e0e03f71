//! Health articles bundled with the client.
//!
//! Articles ship inside the binary as JSON and are parsed once on first use.
//! Bodies are Markdown; see [`render_markdown`].

mod markdown;

pub use markdown::render_markdown;

use once_cell::sync::Lazy;

use crate::models::BlogPost;

/// Number of articles shown on the home screen.
pub const HOME_ARTICLE_COUNT: usize = 4;

/// Message shown when an article id is unknown.
pub const NOT_FOUND: &str = "Blog not found";

static BLOGS_JSON: &str = include_str!("../../assets/blogs.json");

static BLOGS: Lazy<Vec<BlogPost>> = Lazy::new(|| match serde_json::from_str(BLOGS_JSON) {
    Ok(posts) => posts,
    Err(e) => {
        tracing::error!("Bundled articles are invalid: {}", e);
        Vec::new()
    }
});

/// All bundled articles, in publication order.
pub fn all() -> &'static [BlogPost] {
    &BLOGS
}

/// Look up an article by id.
pub fn find(id: u32) -> Option<&'static BlogPost> {
    BLOGS.iter().find(|post| post.id == id)
}

/// The articles featured on the home screen.
pub fn home_selection() -> &'static [BlogPost] {
    let posts = all();
    &posts[..posts.len().min(HOME_ARTICLE_COUNT)]
}
