use crate::{
    api::{employee, health, presence, teams},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter for the API scope; `None` when disabled (0 per minute).
pub fn build_limiter(requests_per_min: u32) -> Option<RateLimit> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: Option<&RateLimit>) {
    // Malformed bodies, paths and queries answer with the same `{error}` shape
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }));

    let scope = web::scope(&config.api_prefix).configure(api);
    match limiter {
        Some(limiter) => cfg.service(scope.wrap(Governor::new(limiter))),
        None => cfg.service(scope),
    };
}

fn api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .service(
            web::scope("/teams")
                // /teams
                .service(
                    web::resource("")
                        .route(web::get().to(teams::list_teams))
                        .route(web::post().to(teams::create_team)),
                )
                // /teams/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(teams::get_team))
                        .route(web::put().to(teams::update_team))
                        .route(web::delete().to(teams::delete_team)),
                ),
        )
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::get().to(employee::list_employees))
                        .route(web::post().to(employee::create_employee)),
                )
                // /employees/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::put().to(employee::update_employee))
                        .route(web::delete().to(employee::delete_employee)),
                )
                // /employees/{id}/activate
                .service(
                    web::resource("/{id}/activate")
                        .route(web::patch().to(employee::set_employee_active)),
                ),
        )
        .service(
            web::scope("/presence")
                // /presence
                .service(web::resource("").route(web::get().to(presence::list_presence)))
                // /presence/{employee_id}
                .service(
                    web::resource("/{employee_id}").route(web::post().to(presence::set_presence)),
                ),
        )
        .route("/summary", web::get().to(presence::get_summary));
}
