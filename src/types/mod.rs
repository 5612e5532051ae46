// src/types/mod.rs
pub mod models;
pub mod requests;
pub mod response;

pub use models::*;
pub use requests::{
    ApplicationDraft, BatchAction, NewOrganization, NewPost, OrganizationPatch, PostPatch,
    ProfilePatch,
};
pub use response::*;
