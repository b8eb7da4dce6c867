use std::path::PathBuf;

use clap::ArgMatches;

use crate::config::{load_config, resolve_page_size, resolve_users_file};
use crate::error::ScrollResult;
use crate::formatting::{print_user_detail, print_users};
use crate::models::UserListResponse;

pub fn handle_show(matches: &ArgMatches) -> ScrollResult<()> {
    let config = load_config()?;
    let users_file = resolve_users_file(matches.get_one::<PathBuf>("file").cloned(), &config)?;
    let offset = matches.get_one::<usize>("offset").copied().unwrap_or(0);
    let limit = resolve_page_size(matches.get_one::<usize>("limit").copied(), &config)?;

    let response = UserListResponse::load_file(&users_file)?;
    let users = response.normalize_page(offset, limit);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else if matches.get_flag("detail") {
        for user in &users {
            print_user_detail(user);
        }
    } else {
        print_users(&users, response.len());
    }

    Ok(())
}
