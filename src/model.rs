pub use blog::*;
pub use user::*;

mod blog;
mod user;

pub mod prelude {
    pub use super::{now, Blog, BlogChanges, BlogView, Timestamp, User, UserView};
}

pub type Timestamp = chrono::DateTime<chrono::Utc>;

pub fn now() -> Timestamp {
    chrono::Utc::now()
}
