use axum::extract::State;
use axum::Json;
use tracing::instrument;

use super::*;
use crate::auth::AuthError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// Returned by a successful login. `token` goes into the `Authorization: Bearer` header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

#[instrument(skip_all)]
pub async fn login(State(app): State<App>, Payload(payload): Payload<Login>) -> Result<Json<Session>> {
    let Login { username, password } = payload;

    let user = match app.authenticator.signin(&username, &password, &app.database).await {
        Ok(user) => user,
        Err(error @ AuthError::InvalidLogin { .. }) => return Err(error).context(UnauthorizedSnafu),
        Err(error) => return Err(error).context(SessionSnafu),
    };

    let token = app.authenticator.issue(&user).context(SessionSnafu)?;

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(Session {
        token,
        username: user.username,
        name: user.name,
    }))
}
