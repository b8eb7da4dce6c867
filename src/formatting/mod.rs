pub mod users;
pub mod utils;

pub use users::{print_user_detail, print_users};
pub use utils::truncate;
