use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vitrine::config::Config;
use vitrine::contact::ContactForm;
use vitrine::store::{ContentStore, Document, QueryOptions, StoreError};

/// Get the config file path (~/.config/vitrine/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("vitrine")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "vitrine", about = "Portfolio content store admin tool")]
struct Args {
    /// Config file path (defaults to ~/.config/vitrine/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a collection's documents as JSON, in query order
    List {
        collection: String,

        /// Payload field to sort by
        #[arg(long, default_value = "order")]
        order_by: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Cap the number of rows returned
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Follow a collection, printing each delivered snapshot until Ctrl-C
    Watch { collection: String },

    /// Append a contact message (validated like the public form)
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

fn query_options(order_by: String, desc: bool, limit: Option<u32>) -> QueryOptions {
    let mut options = QueryOptions::order_by(&order_by);
    if desc {
        options = options.descending();
    }
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    options
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .context("Failed to load configuration")?
        .with_env_overrides();

    let store = match ContentStore::open(&config.database_path, &config.owner_id).await {
        Ok(store) => store,
        Err(StoreError::InstanceLocked) => {
            eprintln!("Error: the content database is locked by another process. Please close it and try again.");
            std::process::exit(1);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to open content database: {}", e)),
    };

    match args.command {
        Command::List {
            collection,
            order_by,
            desc,
            limit,
        } => {
            let options = query_options(order_by, desc, limit);
            let docs: Vec<Document<serde_json::Value>> = store
                .get_items(&collection, &options)
                .await
                .with_context(|| format!("Failed to list collection '{}'", collection))?;

            for doc in &docs {
                let mut line = serde_json::Map::new();
                line.insert("id".to_string(), serde_json::Value::String(doc.id.clone()));
                if let serde_json::Value::Object(fields) = &doc.data {
                    line.extend(fields.clone());
                }
                println!("{}", serde_json::Value::Object(line));
            }
            eprintln!("{} documents in '{}'", docs.len(), collection);
        }

        Command::Watch { collection } => {
            eprintln!("Watching '{}' (Ctrl-C to stop)...", collection);
            let name = collection.clone();
            let subscription = store.subscribe_to_collection::<serde_json::Value, _>(
                &collection,
                QueryOptions::default(),
                move |snapshot| match snapshot {
                    Ok(docs) => {
                        println!("--- snapshot: {} documents in '{}'", docs.len(), name);
                        for doc in docs {
                            println!("{}  {}", doc.id, doc.data);
                        }
                    }
                    Err(e) => eprintln!("--- refresh failed: {}", e),
                },
            );

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;
            subscription.cancel();
            eprintln!("Stopped.");
        }

        Command::AddContact {
            name,
            email,
            message,
        } => {
            let form = ContactForm::new(name, email, message);
            match form.submit(&store).await {
                Ok(id) => println!("Message stored with id {}", id),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
