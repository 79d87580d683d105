//! Tenancy command handlers.

mod add_member;
mod create_workspace;
mod remove_member;
mod resolve_access;
mod update_member_role;

pub use add_member::{AddMemberCommand, AddMemberHandler};
pub use create_workspace::{CreateWorkspaceCommand, CreateWorkspaceHandler};
pub use remove_member::{RemoveMemberCommand, RemoveMemberHandler};
pub use resolve_access::{ResolveAccessCommand, ResolveAccessHandler};
pub use update_member_role::{UpdateMemberRoleCommand, UpdateMemberRoleHandler};
