use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a user record.
///
/// The identifier is opaque to the client: it is accepted from JSON as either a
/// number or a string and only ever rendered back into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawUserId")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Number(n) => Self(n.to_string()),
            RawUserId::Text(s) => Self(s),
        }
    }
}

/// Account status of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string names none of the known statuses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown status '{0}' (expected Active, Inactive or Pending)")]
pub struct UnknownStatus(pub String);

impl FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// A user record as held by the remote collection.
///
/// Records are created and destroyed only by the remote resource; the client
/// never assigns an [`UserId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the remote collection
    /// * `name` - User's display name
    /// * `email` - User's email address
    /// * `status` - Account status
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        status: UserStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            status,
        }
    }
}

/// Names of the editable fields of a [`UserDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Name,
    Email,
    Status,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Name, DraftField::Email, DraftField::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Status => "status",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// In-progress edit buffer for creating or updating a user.
///
/// Fields hold raw form input. The status stays a string so an empty value can
/// be represented and rejected by validation instead of at parse time.
/// Serializes to the `{name, email, status}` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub status: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            status: UserStatus::default().to_string(),
        }
    }
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status: status.into(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Status => &self.status,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Status => self.status = value,
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            status: user.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_numbers_and_strings() {
        let users: Vec<User> = serde_json::from_str(
            r#"[
                {"id": 7, "name": "Ann", "email": "ann@x.com", "status": "Active"},
                {"id": "u-8", "name": "Bob", "email": "bob@x.com", "status": "Pending"}
            ]"#,
        )
        .unwrap();

        assert_eq!(users[0].id, UserId::from(7u64));
        assert_eq!(users[1].id.as_str(), "u-8");
        assert_eq!(users[1].status, UserStatus::Pending);
    }

    #[test]
    fn draft_serializes_to_request_body() {
        let draft = UserDraft::new("Ann", "ann@x.com", "Inactive");
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ann", "email": "ann@x.com", "status": "Inactive"})
        );
    }

    #[test]
    fn draft_defaults_to_active_and_seeds_from_record() {
        assert_eq!(UserDraft::default(), UserDraft::new("", "", "Active"));

        let user = User::new(3u64, "Cy", "cy@x.com", UserStatus::Inactive);
        assert_eq!(UserDraft::from(&user), UserDraft::new("Cy", "cy@x.com", "Inactive"));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("pending".parse::<UserStatus>(), Ok(UserStatus::Pending));
        assert!("archived".parse::<UserStatus>().is_err());
    }
}
