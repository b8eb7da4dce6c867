pub const APP_DIR_NAME: &str = "viewport-scroll";
pub const CONFIG_FILE: &str = ".viewport-scroll-config.json";

pub const USERS_FILE_ENV: &str = "VIEWPORT_SCROLL_USERS_FILE";
pub const PAGE_SIZE_ENV: &str = "VIEWPORT_SCROLL_PAGE_SIZE";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Fire as soon as any part of the target enters the root.
pub const DEFAULT_THRESHOLD: f32 = 0.0;
