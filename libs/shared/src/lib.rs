//! Shared library for the DevHub command-line client: GitHub OAuth sign-in,
//! the session store and the login controller tying them together.

pub mod github;
pub mod login;
pub mod models;
pub mod oauth;
pub mod store;
