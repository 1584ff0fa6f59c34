use crate::prelude::*;

/// A registered account. The password hash stays in the database and is never deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: Record<User>,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub blogs: Vec<Record<Blog>>,
}

define_table!("users" : User = id);

define_relation! {
    User > all() > Vec<User>
        where "SELECT * FROM users ORDER BY created_at ASC"
}

define_relation! {
    User > get(id: &Record<User>) > Option<User>
        where "SELECT * FROM $id"
}

define_relation! {
    User > by_username(username: &str) > Option<User>
        where "SELECT * FROM users WHERE username = $username LIMIT 1"
}

define_relation! {
    User > find(username: &str, password: &str) > Option<User>
        where "SELECT * FROM users WHERE username = $username AND crypto::argon2::compare(password, $password) LIMIT 1"
}

define_relation! {
    User > add_blog(id: &Record<User>, blog: &Record<Blog>) > Option<User>
        where "UPDATE users SET blogs += $blog WHERE id = $id RETURN AFTER"
}

define_relation! {
    User > forget_blog(blog: &Record<Blog>) > Vec<User>
        where "UPDATE users SET blogs -= $blog WHERE blogs CONTAINS $blog RETURN AFTER"
}

impl User {
    /// Stores a new account. The password is hashed with argon2 by the database.
    pub async fn register(
        username: &str,
        name: Option<&str>,
        password: &str,
        db: &Database,
    ) -> Result<User, DatabaseQueryError> {
        tracing::info!(username, "registering user");
        db.sql("CREATE users SET created_at = time::now(), username = $username, name = $name, password = crypto::argon2::generate($password), blogs = [] RETURN AFTER")
            .bind(("username", username))
            .bind(("name", name))
            .bind(("password", password))
            .fetch_one()
            .await
    }
}

/// JSON shape of a [User] as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        UserView {
            id: user.id.key(),
            username: user.username.clone(),
            name: user.name.clone(),
            blogs: user.blogs.iter().map(Record::key).collect(),
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_lists_blog_keys() {
        let user = User {
            id: Record::new("xgoivo".to_string()),
            username: "xGoivo".into(),
            name: Some("Eduardo".into()),
            blogs: vec![Record::new("a".to_string()), Record::new("b".to_string())],
        };

        let view = UserView::from(&user);

        assert_eq!(view.id, "xgoivo");
        assert_eq!(view.blogs, vec!["a".to_string(), "b".to_string()]);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password").is_none());
    }
}
