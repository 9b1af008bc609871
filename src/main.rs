use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};

use employee_directory::cli::{self, Cli, Command};
use employee_directory::client::{EmployeeStore, HttpEmployeeApi};
use employee_directory::config::Config;
use employee_directory::db::EmployeeDb;
use employee_directory::handlers;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    match args.command {
        Command::Serve => serve().await,
        Command::Client(command) => {
            let mut store = EmployeeStore::new(HttpEmployeeApi::new(&args.api_url));
            match cli::run(command, &mut store).await {
                Ok(output) => {
                    print!("{}", output);
                    Ok(())
                }
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn serve() -> io::Result<()> {
    let config =
        Config::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    // Shared across workers; each worker gets a handle to the same table
    let db = web::Data::new(EmployeeDb::seeded(config.seed_employees));
    if db.is_empty() {
        warn!("Starting with an empty employee table");
    } else {
        info!("Seeded {} employees", db.len());
    }

    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
