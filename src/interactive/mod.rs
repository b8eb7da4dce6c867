pub mod app;
pub mod event;
pub mod feed;
pub mod handlers;
pub mod layout;
pub mod ui;

pub use app::UserBrowser;
pub use feed::UserFeed;
pub use handlers::run_browser;
