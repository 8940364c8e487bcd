use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use phonebook::{
    config::cache::init_redis_client,
    models::person::PersonInput,
    services::person_service,
    storage::{PersonStore, RedisPersonStore},
};

#[derive(Parser)]
#[command(name = "phonebook-cli")]
#[command(about = "List or add phonebook entries directly in the store")]
struct Args {
    #[arg(long, env = "REDIS_URL")]
    redis_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every stored person
    List,
    /// Add a person
    Add { content: String, number: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let pool = init_redis_client(&args.redis_url, 1).context("Failed to connect to redis")?;
    let store = RedisPersonStore::new(pool);

    run(args.command, &store, &mut std::io::stdout()).await
}

async fn run<W: Write>(command: Command, store: &dyn PersonStore, out: &mut W) -> Result<()> {
    match command {
        Command::List => {
            let people = person_service::find_all(store)
                .await
                .context("Failed to list people")?;
            writeln!(out, "phonebook:")?;
            for person in people {
                writeln!(out, "{} {}", person.content, person.number)?;
            }
        }
        Command::Add { content, number } => {
            let input = PersonInput {
                content: Some(content),
                number: Some(number),
            };
            let person = person_service::create_and_validate(input, store)
                .await
                .context("Failed to add person")?;
            writeln!(
                out,
                "added {} number {} to phonebook",
                person.content, person.number
            )?;
        }
    }
    Ok(())
}
