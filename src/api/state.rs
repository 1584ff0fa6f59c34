use std::sync::Arc;

use derive_new::new;

use crate::auth::Authenticator;
use crate::database::Database;

/// Shared handler state.
#[derive(Debug, Clone, new)]
pub struct App {
    pub database: Database,
    pub authenticator: Arc<Authenticator>,
}

impl<'a> From<&'a App> for &'a Database {
    fn from(app: &'a App) -> Self {
        &app.database
    }
}

pub fn create_app(database: Database, authenticator: Authenticator) -> App {
    App {
        database,
        authenticator: Arc::new(authenticator),
    }
}
