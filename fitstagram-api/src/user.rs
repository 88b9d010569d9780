use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn me() -> UserId {
        UserId(String::from(ME))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ME: &str = "me";

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> User {
        User {
            id: UserId(id.into()),
            username: username.into(),
        }
    }

    /// The user operating this client
    ///
    /// Comments written locally are authored by this user, and only comments
    /// authored by them can be deleted.
    pub fn me() -> User {
        User {
            id: UserId::me(),
            username: String::from(ME),
        }
    }
}
