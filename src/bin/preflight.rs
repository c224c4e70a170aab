use bookstore_api::infra::{logging, Backend, Config};
use bookstore_api::storage;
use bookstore_api::BookStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Checks configuration and store connectivity, then exits.\n\
         Reads env vars (or .env):\n\
           DATABASE_URL, BOOKSTORE_BACKEND, HOST, PORT, DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    logging::init();

    let config = Config::from_env()?;
    println!("> Preflight:");
    println!("  BOOKSTORE_BACKEND={:?}", config.backend);
    println!(
        "  DATABASE_URL={}",
        config.redacted_database_url().as_deref().unwrap_or("<unset>")
    );
    println!("  LISTEN={}", config.listen_addr());
    if config.backend == Backend::Memory {
        eprintln!("  Warning: memory backend selected; data will not survive a restart.");
    }

    // Opening the store also creates the books table when missing.
    let store = storage::open(&config).await?;
    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Store is not reachable: {:#}", e))?;
    let count = store.count().await?;
    println!("  Store reachable, {} book(s) stored.", count);

    // Port availability
    match tokio::net::TcpListener::bind(config.listen_addr()).await {
        Ok(_) => println!("  Listen address is free."),
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Cannot bind {}: {}",
                config.listen_addr(),
                e
            ))
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
