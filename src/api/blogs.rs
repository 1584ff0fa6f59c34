use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use super::*;

/// Fields accepted when creating or replacing a blog.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlogPayload {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub likes: Option<u64>,
}

impl BlogPayload {
    /// Requires a non-empty title and url. Missing likes become zero.
    pub fn validate(self) -> Result<BlogChanges> {
        let title = self.title.filter(|title| !title.is_empty());
        let url = self.url.filter(|url| !url.is_empty());

        let (Some(title), Some(url)) = (title, url) else {
            return ValidationSnafu {
                message: "url or title missing",
            }
            .fail();
        };

        Ok(BlogChanges {
            title,
            url,
            author: self.author,
            likes: self.likes.unwrap_or(0),
        })
    }
}

#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<BlogView>>> {
    let blogs = Blog::all(&app.database).await.context(DatabaseSnafu)?;
    Ok(Json(blogs.into_iter().map(BlogView::from).collect()))
}

#[instrument(skip(app))]
pub async fn info(State(app): State<App>, Path(id): Path<String>) -> Result<Json<BlogView>> {
    let id = Record::<Blog>::new(id);

    let blog = Blog::get(&id, &app.database)
        .await
        .context(DatabaseSnafu)?
        .context(NotFoundSnafu { what: "blog" })?;

    Ok(Json(blog.into()))
}

#[instrument(skip(app))]
pub async fn create(
    State(app): State<App>,
    CurrentUser(credentials): CurrentUser,
    Payload(payload): Payload<BlogPayload>,
) -> Result<(StatusCode, Json<BlogView>)> {
    let owner = User::get(&credentials.user(), &app.database)
        .await
        .context(DatabaseSnafu)?
        .context(UnknownUserSnafu)?;

    let blog = payload.validate()?.into_blog().owned_by(owner.id.clone());
    let blog = blog.create(&app.database).await.context(DatabaseSnafu)?;

    User::add_blog(&owner.id, &blog.id, &app.database)
        .await
        .context(DatabaseSnafu)?;

    tracing::info!(blog_id = %blog.id, user_id = %owner.id, "created blog");
    Ok((StatusCode::CREATED, Json(blog.into())))
}

#[instrument(skip(app))]
pub async fn update(
    State(app): State<App>,
    Path(id): Path<String>,
    Payload(payload): Payload<BlogPayload>,
) -> Result<Json<BlogView>> {
    let id = Record::<Blog>::new(id);
    let changes = payload.validate()?;

    let blog = changes
        .apply(&id, &app.database)
        .await
        .context(DatabaseSnafu)?
        .context(NotFoundSnafu { what: "blog" })?;

    tracing::info!(blog_id = %blog.id, "updated blog");
    Ok(Json(blog.into()))
}

/// Deletes the blog if it exists. Unknown ids are not an error.
#[instrument(skip(app))]
pub async fn remove(State(app): State<App>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = Record::<Blog>::new(id);

    let removed = Blog::remove(&id, &app.database)
        .await
        .context(DatabaseSnafu)?;

    if !removed.is_empty() {
        User::forget_blog(&id, &app.database)
            .await
            .context(DatabaseSnafu)?;
        tracing::info!(blog_id = %id, "deleted blog");
    }

    Ok(StatusCode::NO_CONTENT)
}
