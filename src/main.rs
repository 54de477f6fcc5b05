use actix_files as fs;
use actix_web::{middleware, web, App, HttpServer};
use cross_pager::config::Config;
use cross_pager::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let server_address = config.server_address();

    log::info!("Starting Cross Pager preview server...");
    log::info!(
        "Configuration loaded successfully (page size {}, {} items, {} links)",
        config.page_size,
        config.total_items,
        if config.ajax_options.is_some() { "unobtrusive AJAX" } else { "htmx" }
    );

    let routes = handlers::preview_routes().expect("Failed to build route table");

    log::info!("Server starting on http://{server_address}");
    log::info!("🌐 Click here to open: http://localhost:{}", config.port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add logger middleware
            .wrap(middleware::Logger::default())
            // Add shared state
            .app_data(web::Data::new(routes.clone()))
            .app_data(web::Data::new(config.clone()))
            // Static file serving, ahead of the catch-all preview route
            .service(fs::Files::new("/assets", "./assets"))
            // Web interface routes
            .route("/", web::get().to(handlers::index))
            .route("/{controller}/{action}", web::get().to(handlers::preview))
    })
    .bind(&server_address)?
    .run()
    .await
}
