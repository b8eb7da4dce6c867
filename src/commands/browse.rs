use std::path::PathBuf;

use clap::ArgMatches;

use crate::config::{load_config, resolve_page_size, resolve_users_file};
use crate::error::ScrollResult;
use crate::interactive::run_browser;

pub fn handle_browse(matches: &ArgMatches) -> ScrollResult<()> {
    let config = load_config()?;
    let users_file = resolve_users_file(matches.get_one::<PathBuf>("file").cloned(), &config)?;
    let page_size = resolve_page_size(matches.get_one::<usize>("page-size").copied(), &config)?;

    run_browser(&users_file, page_size, &config)
}
