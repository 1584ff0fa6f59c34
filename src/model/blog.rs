use crate::prelude::*;

/// A single entry in the blog list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, new)]
pub struct Blog {
    #[new(default)]
    pub id: Record<Blog>,
    #[new(value = "now()")]
    pub created_at: Timestamp,

    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Records stored without a like count are read back as having none.
    #[serde(default)]
    pub likes: u64,

    /// The user who submitted the entry, if any.
    #[new(default)]
    #[serde(default)]
    pub user: Option<Record<User>>,
}

define_table!("blogs" : Blog = id);

define_relation! {
    Blog > all() > Vec<Blog>
        where "SELECT * FROM blogs ORDER BY created_at ASC"
}

define_relation! {
    Blog > get(id: &Record<Blog>) > Option<Blog>
        where "SELECT * FROM $id"
}

define_relation! {
    Blog > replace(id: &Record<Blog>, title: &str, url: &str, author: Option<&str>, likes: u64) > Option<Blog>
        where "UPDATE blogs SET title = $title, url = $url, author = $author, likes = $likes WHERE id = $id RETURN AFTER"
}

define_relation! {
    Blog > remove(id: &Record<Blog>) > Vec<Blog>
        where "DELETE blogs WHERE id = $id RETURN BEFORE"
}

impl Blog {
    pub fn owned_by(mut self, user: Record<User>) -> Self {
        self.user = Some(user);
        self
    }

    pub async fn create(&self, db: &Database) -> Result<Blog, DatabaseQueryError> {
        tracing::info!(blog_id = %self.id, title = %self.title, "inserting blog");
        db.sql("CREATE blogs CONTENT $blog RETURN AFTER")
            .bind(("blog", self))
            .fetch_one()
            .await
    }
}

/// The full set of editable fields of a [Blog], already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub likes: u64,
}

impl BlogChanges {
    pub fn into_blog(self) -> Blog {
        Blog::new(self.title, self.url, self.author, self.likes)
    }

    pub async fn apply(&self, id: &Record<Blog>, db: &Database) -> Result<Option<Blog>, DatabaseQueryError> {
        Blog::replace(id, &self.title, &self.url, self.author.as_deref(), self.likes, db).await
    }
}

/// JSON shape of a [Blog] as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub likes: u64,
    pub user: Option<String>,
}

impl From<&Blog> for BlogView {
    fn from(blog: &Blog) -> Self {
        BlogView {
            id: blog.id.key(),
            title: blog.title.clone(),
            url: blog.url.clone(),
            author: blog.author.clone(),
            likes: blog.likes,
            user: blog.user.as_ref().map(Record::key),
        }
    }
}

impl From<Blog> for BlogView {
    fn from(blog: Blog) -> Self {
        BlogView::from(&blog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_exposes_plain_ids() {
        let owner = Record::<User>::new("alice".to_string());
        let blog = Blog::new(
            "React patterns".into(),
            "https://reactpatterns.com/".into(),
            Some("Michael Chan".into()),
            7,
        )
        .owned_by(owner);

        let json = serde_json::to_value(BlogView::from(&blog)).unwrap();

        assert_eq!(json["id"], blog.id.key());
        assert_eq!(json["user"], "alice");
        assert_eq!(json["likes"], 7);
        assert!(json.get("_id").is_none());
        assert!(!json["id"].as_str().unwrap().starts_with("blogs:"));
    }

    #[test]
    fn changes_become_a_fresh_unowned_blog() {
        let changes = BlogChanges {
            title: "Type wars".into(),
            url: "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html".into(),
            author: None,
            likes: 0,
        };

        let blog = changes.clone().into_blog();

        assert_eq!(blog.title, changes.title);
        assert_eq!(blog.likes, 0);
        assert!(blog.author.is_none());
        assert!(blog.user.is_none());
        assert_eq!(blog.id.tb, "blogs");
    }
}
