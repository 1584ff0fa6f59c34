use axum::extract::State;
use axum::Json;
use tracing::instrument;

use super::*;
use crate::aggregate::{self, AuthorCount, AuthorLikes};

/// Aggregate figures over every stored blog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Summary {
    pub dummy: u64,
    pub total_likes: u64,
    pub favorite_blog: Option<BlogView>,
    pub most_prolific_author: Option<AuthorCount>,
    pub most_liked_author: Option<AuthorLikes>,
}

impl Summary {
    pub fn of(blogs: &[Blog]) -> Self {
        Summary {
            dummy: aggregate::dummy(blogs),
            total_likes: aggregate::total_likes(blogs),
            favorite_blog: aggregate::favorite_blog(blogs).map(BlogView::from),
            most_prolific_author: aggregate::most_prolific_author(blogs),
            most_liked_author: aggregate::most_liked_author(blogs),
        }
    }
}

#[instrument(skip(app))]
pub async fn summary(State(app): State<App>) -> Result<Json<Summary>> {
    let blogs = Blog::all(&app.database).await.context(DatabaseSnafu)?;
    Ok(Json(Summary::of(&blogs)))
}
