use colored::*;

use super::utils::truncate;
use crate::models::NormalizedUser;

pub fn print_users(users: &[NormalizedUser], total: usize) {
    if users.is_empty() {
        println!("{}", "No users found.".dimmed());
        return;
    }

    println!("\n{}", format!("Users ({} of {})", users.len(), total).bold().blue());
    println!("{}", "═".repeat(80).blue());

    for user in users {
        println!(
            "{:>5}  {:<28} {}",
            user.id.dimmed(),
            truncate(&user.name, 28).bold(),
            user.email.cyan()
        );
    }
}

pub fn print_user_detail(user: &NormalizedUser) {
    println!("{} {}", "▸".cyan(), user.name.bold());
    println!("  {} {}", "ID:".dimmed(), user.id);
    println!("  {} {}", "Email:".dimmed(), user.email);
    println!("  {} {}", "Picture:".dimmed(), user.picture.underline());
}
