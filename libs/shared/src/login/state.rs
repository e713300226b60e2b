use crate::oauth::method::LoginMethod;

/// Which sign-in method, if any, the user most recently started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginAttemptState {
    #[default]
    Idle,
    InProgress(LoginMethod),
}

impl LoginAttemptState {
    pub fn method(&self) -> Option<LoginMethod> {
        match self {
            Self::Idle => None,
            Self::InProgress(method) => Some(*method),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }
}
