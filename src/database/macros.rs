/// Implements [Table](crate::database::Table) for a model whose id lives in the given field.
///
/// ```ignore
/// define_table!("blogs" : Blog = id);
/// ```
#[macro_export]
macro_rules! define_table {
    ($table:literal : $model:ty = $id:ident) => {
        impl $crate::database::Table for $model {
            fn id(&self) -> &$crate::database::Thing {
                self.$id.as_ref()
            }

            fn table() -> &'static str {
                $table
            }
        }
    };
}

/// Defines a method to query the database using SQL.
///
/// # Syntax
/// ```text
/// [Base Type] > method_name(...arguments) > [Output Type] where "sql query"
/// ```
/// Where the `Base Type` is the type that the method is being defined for and the `Output Type` is the type that the method will return.
/// Every argument is bound to the query under its own name.
///
/// # Example
///
/// ```ignore
/// define_relation! {
///     Blog > by_author(author: &str) > Vec<Blog>
///         where "SELECT * FROM blogs WHERE author = $author"
/// }
///
/// let blogs = Blog::by_author("Michael Chan", &db).await?;
/// ```
#[macro_export]
macro_rules! define_relation {
    ($model:ty > $relation:ident ($($binding:ident : $binding_type:ty),*) > $export:ty where $query:literal) => {
        impl $model {
            pub async fn $relation(
                $($binding : $binding_type ,)*
                db: &$crate::database::Database,
            ) -> ::std::result::Result<$export, $crate::database::DatabaseQueryError> {
                tracing::debug!(
                    table = <$model as $crate::database::Table>::table(),
                    relation = stringify!($relation),
                    "running query"
                );

                db.sql($query)
                    $(.bind((stringify!($binding), $binding)))*
                    .fetch_first()
                    .await
            }
        }
    };
}
