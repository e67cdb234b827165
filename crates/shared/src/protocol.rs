//! Wire shape of the random-user endpoint.
//!
//! The endpoint returns `{ "results": [ { "name": { "first", "last" },
//! "email", "picture": { "large" } } ] }` plus metadata we ignore.

use serde::{Deserialize, Serialize};

use crate::domain::UserRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub results: Vec<ApiPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPerson {
    pub name: ApiName,
    pub email: String,
    pub picture: Option<ApiPicture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPicture {
    pub large: Option<String>,
}

impl From<ApiPerson> for UserRecord {
    fn from(person: ApiPerson) -> Self {
        Self {
            name_first: person.name.first,
            name_last: person.name.last,
            email: person.email,
            picture_url: person.picture.and_then(|picture| picture.large),
        }
    }
}
