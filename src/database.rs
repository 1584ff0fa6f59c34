use derive_new::new;
use snafu::{Location, ResultExt as _, Snafu};
use surrealdb::{
    engine::any::Any,
    opt::auth::{self, Credentials, Jwt, Signin},
    Surreal,
};
use url::Url;

pub use surrealdb::sql::Thing;

/// Typed record ids.
pub mod record;

/// Helper for executing arbitrary SurrealQL queries.
pub mod query;

/// Macros for defining table methods.
pub mod macros;

pub use query::{DatabaseQueryError, Query};
pub use record::Record;

use crate::Located;

pub mod prelude {
    pub use super::{
        Auth, Connection, Database, DatabaseError, DatabaseQueryError, Record, ServerConnection,
        Table, Thing,
    };
    pub use crate::{define_relation, define_table};
}

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

const SCHEMA: &str = include_str!("../schema.surrealql");

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DatabaseError {
    #[snafu(display("cannot connect to the database `{url}` at {location}: {source}"))]
    DatabaseConnection {
        url: Url,
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("cannot sign in to the database `{url}` at {location}: {source}"))]
    SignIn {
        url: Url,
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("cannot select namespace `{namespace}` and database `{database}` at {location}: {source}"))]
    SelectDatabase {
        namespace: String,
        database: String,
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("failed to apply the database schema at {location}: {source}"))]
    ApplySchema {
        source: DatabaseQueryError,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for DatabaseError {
    fn location(&self) -> Location {
        match self {
            DatabaseError::DatabaseConnection { location, .. }
            | DatabaseError::SignIn { location, .. }
            | DatabaseError::SelectDatabase { location, .. }
            | DatabaseError::ApplySchema { location, .. } => *location,
        }
    }
}

/// Represents a type that is stored in a database table.
pub trait Table {
    /// Returns the ID of the record.
    fn id(&self) -> &Thing;

    /// Returns the name of the table associated with the record.
    fn table() -> &'static str;
}

/// Represents a type that can be used to establish a connection to a database.
pub trait Connection {
    /// Establishes a connection to the database.
    fn connect(&self) -> impl std::future::Future<Output = Result<Database>> + Send;
}

/// Represents authentication information for a database connection.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Auth {
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
}

impl Auth {
    pub fn to_raw(&self) -> impl Credentials<Signin, Jwt> + '_ {
        auth::Database {
            username: &self.username,
            password: &self.password,
            namespace: &self.namespace,
            database: &self.database,
        }
    }
}

/// Everything needed to open a session on a SurrealDB endpoint.
///
/// The endpoint can be any address understood by [surrealdb::engine::any], e.g. `mem://` for an in-memory store
/// or `http://localhost:8000` for a remote server. Credentials are optional since an in-memory store has none.
#[derive(Debug, Clone, Copy)]
pub struct ServerConnection<'a> {
    pub address: &'a Url,
    pub namespace: &'a str,
    pub database: &'a str,
    pub credentials: Option<&'a Auth>,
}

impl Connection for ServerConnection<'_> {
    async fn connect(&self) -> Result<Database> {
        let url = self.address;
        tracing::info!(%url, namespace = self.namespace, database = self.database, "connecting to database");

        let db = surrealdb::engine::any::connect(url.as_str())
            .await
            .context(DatabaseConnectionSnafu { url: url.clone() })?;

        if let Some(credentials) = self.credentials {
            db.signin(credentials.to_raw())
                .await
                .context(SignInSnafu { url: url.clone() })?;
        }

        db.use_ns(self.namespace)
            .use_db(self.database)
            .await
            .context(SelectDatabaseSnafu {
                namespace: self.namespace,
                database: self.database,
            })?;

        let database = Database::new(db);
        database.setup().await?;

        Ok(database)
    }
}

/// Represents a database wrapper.
///
/// This struct provides a wrapper around a database, allowing for easier interaction and abstraction.
#[derive(Debug, Clone, new)]
pub struct Database {
    database: Surreal<Any>,
}

impl Database {
    /// Opens a fresh in-memory store with the schema applied.
    pub async fn memory(namespace: &str, database: &str) -> Result<Self> {
        let address = Url::parse("mem://").expect("`mem://` is a valid url");

        ServerConnection {
            address: &address,
            namespace,
            database,
            credentials: None,
        }
        .connect()
        .await
    }

    /// Defines the tables and indexes the application relies on. Safe to run more than once.
    pub async fn setup(&self) -> Result<()> {
        self.sql(SCHEMA)
            .execute()
            .await
            .context(ApplySchemaSnafu)?;
        Ok(())
    }

    /// Create a builder to execute arbitrary SQL code on the database.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let blogs: Vec<Blog> = db.sql("SELECT * FROM blogs WHERE likes > $likes")
    ///                 .bind(("likes", 10))
    ///                 .fetch_first().await?;
    /// ```
    ///
    /// The `fetch_first` method can deserialize the result into either a single value (`Option<T>`) or a collection of values (`Vec<T>`).
    pub fn sql(&self, query: &str) -> Query<'_> {
        Query::new(self.database.query(query))
    }
}

impl std::ops::Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.database
    }
}
