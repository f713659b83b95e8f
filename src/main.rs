#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

use api::api::start_server;

use clap::{Parser, Subcommand};
use client::TodoClient;
use config::ServerConfig;
use uuid::Uuid;

mod api;
mod client;
mod config;
mod errors;
mod models;
mod schema;
mod todo_commands;
mod ui;
mod utils;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive board (the default)
    Ui,
    #[clap(alias = "ls")]
    List,
    Show {
        id: Uuid,
    },
    #[clap(alias = "c")]
    Create,
    Edit {
        id: Uuid,
    },
    /// Flip a todo between pending and completed
    Toggle {
        id: Uuid,
    },
    #[clap(alias = "rm")]
    Delete {
        id: Uuid,
    },
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Manage todos from command line")]
struct TodoArgs {
    #[clap(short = 's', long = "start-server")]
    start_server: bool,

    /// Keep todos in memory instead of Postgres (with --start-server)
    #[clap(long = "in-memory")]
    in_memory: bool,

    #[clap(subcommand)]
    command: Option<Commands>,
}

/// Wrapper function for looping a prompt function
/// if error occurs
fn super_prompt(title: &str, function: &dyn Fn() -> anyhow::Result<()>) {
    loop {
        println!("\n{}\n", title);
        let res = function();

        match res {
            Ok(_) => break,
            Err(e) => {
                eprintln!("{:#}", e);

                let response = inquire::Confirm::new("Try again")
                    .with_default(true)
                    .prompt();

                if let Ok(true) = response {
                    continue;
                }

                break;
            }
        }
    }
}

fn report(res: anyhow::Result<()>) {
    if let Err(e) = res {
        eprintln!("{:#}", e);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args = TodoArgs::parse();

    // Client output shares the terminal, keep it quiet unless asked
    let default_filter = if args.start_server {
        "todo_app=debug,actix_web=info,actix_server=info"
    } else {
        "todo_app=warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.start_server {
        start_server(ServerConfig::from_env(), args.in_memory)?;
        return Ok(());
    }

    let client = TodoClient::from_env();

    match args.command {
        Some(Commands::List) => report(todo_commands::list_todos(&client)),
        Some(Commands::Show { id }) => report(todo_commands::show_todo(&client, id)),
        Some(Commands::Create) => {
            super_prompt("Create Todo", &|| todo_commands::create_new_todo(&client));
        }
        Some(Commands::Edit { id }) => {
            super_prompt("Edit Todo", &|| todo_commands::edit_todo(&client, id));
        }
        Some(Commands::Toggle { id }) => report(todo_commands::toggle_todo(&client, id)),
        Some(Commands::Delete { id }) => report(todo_commands::delete_todo(&client, id)),
        Some(Commands::Ui) | None => ui::todo_list_renderer::render_todo_list(&client)?,
    }

    Ok(())
}
