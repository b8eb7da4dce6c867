pub mod user;

// Re-export commonly used types
pub use user::{NormalizedUser, RemoteUser, UserListResponse, UserName, UserPicture};
