//! Sign-in choices offered to the user, in the order they are shown

use crate::oauth::method::LoginMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOption {
    pub method: LoginMethod,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Icon hint for front-ends that draw one
    pub icon: &'static str,
    /// This option's sign-in is the one currently being processed
    pub loading: bool,
}

impl LoginOption {
    pub fn for_method(method: LoginMethod, loading: bool) -> Self {
        let (subtitle, icon) = match method {
            LoginMethod::PublicAccess => ("Public access", "globe"),
            LoginMethod::PrivateAccess => ("Private access", "lock"),
        };

        Self {
            method,
            title: "Sign in with GitHub",
            subtitle,
            icon,
            loading,
        }
    }

    /// Get a display string combining title and subtitle
    pub fn display(&self) -> String {
        format!("{} - {}", self.title, self.subtitle)
    }
}
