use std::sync::Arc;

use actix_web::{self, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::{
    config::ServerConfig,
    models::{memory_store::MemoryTodoStore, todo_store::PgTodoStore, todo_store::TodoStore},
};

use super::{errors::TodoApiError, middlewares::cors::Cors, todos_handler};

/// Mounts the todo resource under `/api/todos`
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        TodoApiError::BadRequest(format!("Invalid request body: {}", err)).into()
    });

    cfg.app_data(json_config)
        .route("/", web::get().to(index))
        .service(
            web::scope("/api").service(
                web::scope("/todos")
                    .route("", web::get().to(todos_handler::get_todos))
                    .route("", web::post().to(todos_handler::create_todo))
                    .route("/{id}", web::get().to(todos_handler::get_todo))
                    .route("/{id}", web::put().to(todos_handler::update_todo))
                    .route("/{id}", web::delete().to(todos_handler::delete_todo)),
            ),
        );
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("API is running...")
}

/// Catch-all for anything `configure` does not route
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    TodoApiError::NotFound(format!("Route {}", req.path())).to_response()
}

/// Picks the store backing the api.
/// Postgres runs its migrations before the server accepts requests.
pub fn open_store(config: &ServerConfig, in_memory: bool) -> std::io::Result<Arc<dyn TodoStore>> {
    if in_memory {
        log::warn!("Using in-memory store, todos are lost on shutdown");
        return Ok(Arc::new(MemoryTodoStore::new()));
    }

    let database_url = config.database_url.as_deref().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "DATABASE_URL must be set (or pass --in-memory)",
        )
    })?;

    let store = PgTodoStore::connect(database_url)
        .and_then(|store| store.run_migrations().map(|_| store))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    Ok(Arc::new(store))
}

#[actix_web::main]
pub async fn start_server(config: ServerConfig, in_memory: bool) -> std::io::Result<()> {
    let store = web::Data::from(open_store(&config, in_memory)?);

    log::info!(
        "Starting Server on {} with {} worker(s)",
        config.bind_address,
        config.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors)
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(configure)
            .default_service(web::route().to(not_found))
    })
    .workers(config.workers) // Num of threads
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
