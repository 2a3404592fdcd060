//! This example fetches the units and the users groups of an Aurion instance. <br>
//! The configuration is read from the `AURION_*` environment variables (see [AurionConfig::from_env])

use aurion_rs::{AurionClient, AurionConfig, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = or_exit(AurionConfig::from_env());
    let client = or_exit(AurionClient::new(config));

    println!("> Fetching unite data from Aurion... (1/2)");
    let unites = or_exit(client.get_unites().await);
    for unite in &unites {
        println!("{}: {}", unite.code, unite.label.as_deref().unwrap_or("-"));
    }

    println!("> Fetching users groups from Aurion... (2/2)");
    let groups = or_exit(client.get_users_groups().await);
    for group in &groups {
        match group.membership() {
            Some(membership) => println!("{} is in {:?} in group {}", group.login, membership.code, membership.group),
            None => println!("{} has no decoded membership ({})", group.login, group.raw),
        }
    }
}

fn or_exit<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
