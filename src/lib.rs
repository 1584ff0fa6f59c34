pub mod aggregate;
pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod logger;
pub mod model;

pub mod prelude {
    pub use derive_new::new;
    pub use serde::{de::DeserializeOwned, Deserialize, Serialize};
    pub use snafu::{Location, OptionExt as _, ResultExt as _, Snafu};

    pub use crate::database::prelude::*;
    pub use crate::model::prelude::*;
    pub use crate::Located;
}

/// Errors that remember where in the source they were raised.
pub trait Located {
    fn location(&self) -> snafu::Location;
}
