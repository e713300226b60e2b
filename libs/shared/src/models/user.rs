//! GitHub user profile exposed as the store's `current_user` projection

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubUser {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl GitHubUser {
    /// `@login`, followed by the display name when GitHub has one
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => format!("@{} ({})", self.login, name),
            _ => format!("@{}", self.login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut user = GitHubUser {
            id: 1,
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: None,
        };
        assert_eq!(user.display(), "@octocat (The Octocat)");

        user.name = None;
        assert_eq!(user.display(), "@octocat");
    }

    #[test]
    fn test_deserialize_github_payload() {
        let json = r#"{
            "id": 583231,
            "login": "octocat",
            "name": null,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "type": "User"
        }"#;
        let user: GitHubUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 583231);
        assert_eq!(user.login, "octocat");
        assert!(user.name.is_none());
    }
}
