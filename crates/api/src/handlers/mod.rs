pub mod admin;
pub mod gallery;
pub mod projects;
