use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use eduescape_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    graphql::{create_schema, Schema},
    handlers,
    middleware::RequestIdMiddleware,
};

/// The Bearer token is optional on this endpoint; resolvers that need an
/// identity pull claims from the request data and fail without them.
async fn graphql_handler(
    schema: web::Data<Schema>,
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(header) = http_req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        if let Some(token) = header.strip_prefix("Bearer ") {
            if let Ok(claims) = state.jwt_service.validate_token(token) {
                request = request.data(claims);
            }
        }
    }

    schema.execute(request).await.into()
}

async fn graphiql_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if !cfg!(debug_assertions) {
        config.validate_for_production();
    }

    let bind_host = config.web_server_host.clone();
    let bind_port = config.web_server_port;
    let cors_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config)
        .await
        .map_err(std::io::Error::other)?;
    let jwt_service = (*state.jwt_service).clone();
    let schema = create_schema(state.clone());

    log::info!("Server listening on {}:{}", bind_host, bind_port);
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_host,
        bind_port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(handlers::login)
            .service(handlers::guest_login)
            .service(handlers::refresh_token)
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphiql", web::get().to(graphiql_playground))
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::get_me)
                    .service(handlers::create_demo_curriculum)
                    .service(handlers::create_curriculum)
                    .service(handlers::list_curriculums)
                    .service(handlers::get_curriculum)
                    .service(handlers::start_session)
                    .service(handlers::get_session)
                    .service(handlers::submit_answer)
                    .service(handlers::reveal_hint)
                    .service(handlers::advance_session)
                    .service(handlers::abandon_session),
            )
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
