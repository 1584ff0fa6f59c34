use derive_new::new;
use serde::de::DeserializeOwned;
use snafu::{Location, OptionExt as _, ResultExt as _, Snafu};
use surrealdb::opt::QueryResult;

use crate::Located;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DatabaseQueryError {
    #[snafu(display("failed to execute the query at {location}: {source}"))]
    MalformedQuery {
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("failed to deserialize the database response at {location}: {source}"))]
    Deserialize {
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("expected exactly one result but got none at {location}"))]
    NoResults {
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for DatabaseQueryError {
    fn location(&self) -> Location {
        match self {
            DatabaseQueryError::MalformedQuery { location, .. }
            | DatabaseQueryError::Deserialize { location, .. }
            | DatabaseQueryError::NoResults { location, .. } => *location,
        }
    }
}

/// A pending SurrealQL query. Parameters can be bound using the [Query::bind] method which takes any serializable data structure.
///
/// # Example
/// ```ignore
/// let blogs_by_chan: Vec<Blog> = database.sql("SELECT * FROM blogs WHERE author = $author")
///     .bind(("author", "Michael Chan"))
///     .fetch_first()
///     .await?;
/// ```
#[derive(Debug, new)]
pub struct Query<'a> {
    query: surrealdb::method::Query<'a, surrealdb::engine::any::Any>,
}

impl Query<'_> {
    pub fn bind(mut self, params: impl serde::Serialize) -> Self {
        let query = self.query;
        self.query = query.bind(params);
        self
    }

    /// Execute the query and return a [surrealdb::Response] which is SurrealDB's way to represent a list of statements returned from the database.
    ///
    /// Fails if any of the statements failed.
    pub async fn execute(self) -> Result<surrealdb::Response, DatabaseQueryError> {
        let response = self
            .query
            .await
            .context(MalformedQuerySnafu)?
            .check()
            .context(MalformedQuerySnafu)?;
        tracing::debug!(statements = response.num_statements(), "executed query");
        Ok(response)
    }

    /// Execute the query and return the first result as a deserialized value.
    pub async fn fetch_first<T: DeserializeOwned>(self) -> Result<T, DatabaseQueryError>
    where
        usize: QueryResult<T>,
    {
        let mut statements = self.execute().await?;
        let result = statements.take::<T>(0).context(DeserializeSnafu)?;
        Ok(result)
    }

    /// Execute the query and return the first result, failing when the query produced nothing.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, DatabaseQueryError>
    where
        usize: QueryResult<Option<T>>,
    {
        self.fetch_first::<Option<T>>()
            .await?
            .context(NoResultsSnafu)
    }
}
