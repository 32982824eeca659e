use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use employee_manager::config::Config;
use employee_manager::db::{self, EmployeeStore, MemoryEmployeeStore, PgEmployeeStore};
use employee_manager::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let store: Arc<dyn EmployeeStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(&config, database_url)
                .await
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
            info!("Connected to the database");
            Arc::new(PgEmployeeStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set, records are kept in memory only");
            Arc::new(MemoryEmployeeStore::new())
        }
    };
    let store = web::Data::from(store);

    let (host, port) = config.bind_address();
    info!("Starting server at {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(handlers::configure(store.clone()))
    })
    .bind((host, port))?
    .run()
    .await
}
