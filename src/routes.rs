use crate::{
    api::{attendance, calendar, holiday, leave},
    auth::middleware::auth_middleware,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min}/min"))?;
    Ok(Governor::new(&cfg))
}

/// Mounts every protected route under `api_prefix`.
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, protected_limiter: Arc<Limiter>) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/calendar")
                    // /calendar?year=&month=
                    .service(web::resource("").route(web::get().to(calendar::month_calendar)))
                    // /calendar/{date}
                    .service(web::resource("/{date}").route(web::get().to(calendar::day_detail))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::put().to(attendance::check_out)),
                    )
                    // /attendance/{employee_id}/{date}
                    .service(
                        web::resource("/{employee_id}/{date}")
                            .route(web::put().to(attendance::mark_day)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave::leave_list))
                            .route(web::post().to(leave::create_leave)),
                    )
                    // /leave/mine, before /leave/{id}
                    .service(web::resource("/mine").route(web::get().to(leave::my_leaves)))
                    .service(web::resource("/{id}").route(web::get().to(leave::get_leave)))
                    .service(
                        web::resource("/{id}/approve").route(web::put().to(leave::approve_leave)),
                    )
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    ),
            )
            .service(
                web::scope("/holiday").service(
                    web::resource("")
                        .route(web::get().to(holiday::list_holidays))
                        .route(web::post().to(holiday::create_holiday)),
                ),
            ),
    );
}
