//! deliq CLI Client
//!
//! Command-line interface for interacting with a deliq server.

use clap::{Parser, Subcommand};
use deliq::{Client, Result};

/// deliq CLI
#[derive(Parser, Debug)]
#[command(name = "deliq-cli")]
#[command(about = "CLI for the deliq work queue")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:13331")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count unreserved items in a queue
    Len {
        /// Queue name
        queue: String,
    },

    /// Add an item to a queue
    Add {
        /// Queue name
        queue: String,

        /// Item body
        body: String,

        /// How many times the item may be retried
        #[arg(short, long, default_value = "0")]
        retries: u32,
    },

    /// Reserve the next available item
    Reserve {
        /// Queue name
        queue: String,
    },

    /// Send a reserved item back to the front of the queue
    Retry {
        /// Queue name
        queue: String,

        /// Item id
        id: String,
    },

    /// Mark an item as finished
    Done {
        /// Queue name
        queue: String,

        /// Item id
        id: String,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut client = Client::connect(args.server.as_str())?;

    match args.command {
        Commands::Len { queue } => println!("{}", client.len(&queue)?),
        Commands::Add {
            queue,
            body,
            retries,
        } => println!("{}", client.add(&queue, &body, retries)?),
        Commands::Reserve { queue } => {
            let (id, body) = client.reserve(&queue)?;
            println!("{} {}", id, body);
        }
        Commands::Retry { queue, id } => {
            client.retry(&queue, &id)?;
            println!("OK");
        }
        Commands::Done { queue, id } => {
            client.done(&queue, &id)?;
            println!("OK");
        }
    }

    client.close()
}
