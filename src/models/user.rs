use serde::{Deserialize, Serialize};

/// Profile of an authenticated user.
///
/// All fields are optional because the backend omits them freely and the
/// session layer must tolerate a profile it knows nothing about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub gender: Option<String>,
}

impl User {
    /// Display name for greetings: first name, then username, then "there".
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}

/// Wire shape of the user profile as the backend sends it.
///
/// The login response reuses this shape with the token pair inlined, so the
/// token fields live here too and are stripped when mapping to the domain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,

    pub id: Option<i64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub gender: Option<String>,
}

impl UserDto {
    /// Convert to the domain model. Tokens are intentionally not carried over.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            image: self.image.clone(),
            gender: self.gender.clone(),
        }
    }
}
