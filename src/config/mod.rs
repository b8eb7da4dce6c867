#[allow(clippy::module_inception)]
mod config;

pub use config::{
    Config, load_config, load_config_from, resolve_page_size, resolve_users_file, save_config,
    save_config_to,
};
