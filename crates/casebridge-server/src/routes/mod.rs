pub mod projects;
pub mod sync;
pub mod webhook;
