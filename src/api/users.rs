use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use super::*;

/// Shortest accepted username and password.
pub const MIN_CREDENTIAL_LENGTH: usize = 3;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Registration {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl Registration {
    fn validate(self) -> Result<(String, Option<String>, String)> {
        let username = required("username", self.username)?;
        let password = required("password", self.password)?;
        Ok((username, self.name, password))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if value.chars().count() >= MIN_CREDENTIAL_LENGTH => Ok(value),
        Some(_) => ValidationSnafu {
            message: format!("{field} must be at least {MIN_CREDENTIAL_LENGTH} characters long"),
        }
        .fail(),
        None => ValidationSnafu {
            message: format!("{field} missing"),
        }
        .fail(),
    }
}

#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<UserView>>> {
    let users = User::all(&app.database).await.context(DatabaseSnafu)?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[instrument(skip_all)]
pub async fn create(
    State(app): State<App>,
    Payload(payload): Payload<Registration>,
) -> Result<(StatusCode, Json<UserView>)> {
    let (username, name, password) = payload.validate()?;

    let existing = User::by_username(&username, &app.database)
        .await
        .context(DatabaseSnafu)?;
    if existing.is_some() {
        return UsernameTakenSnafu { username }.fail();
    }

    let user = User::register(&username, name.as_deref(), &password, &app.database)
        .await
        .context(DatabaseSnafu)?;

    tracing::info!(user_id = %user.id, username = %user.username, "created user");
    Ok((StatusCode::CREATED, Json(user.into())))
}
