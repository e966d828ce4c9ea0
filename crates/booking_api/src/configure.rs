use actix_web::{
    HttpMessage as _, HttpResponse, Responder,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use booking_lib::Database;
use tracing_actix_web::{DefaultRootSpanBuilder, RequestId};

use crate::{BookingErrorKind, BookingErrorKindResponse, BookingResult, ErrorResponse};

/// The actix route handler for the Not Found response.
async fn not_found() -> BookingResult<impl Responder> {
    Err::<String, _>(BookingErrorKind::EndpointNotFound)
}

/// The root span of each request, recording the state of the connection pool.
pub struct RootSpanBuilder;

impl tracing_actix_web::RootSpanBuilder for RootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> tracing::Span {
        let (pool_size, pool_num_idle) = request
            .app_data::<Database>()
            .map(Database::pool_state)
            .unwrap_or_default();

        tracing_actix_web::root_span!(
            request,
            pool_size = pool_size,
            pool_num_idle = pool_num_idle,
        )
    }

    fn on_request_end<B: MessageBody>(
        span: tracing::Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Middleware adding the request ID to the body of the error responses.
///
/// It must be wrapped by the [`TracingLogger`](tracing_actix_web::TracingLogger) middleware,
/// which generates the request ID.
pub async fn fit_request_id<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let request_id = req.extensions().get::<RequestId>().cloned();
    let mut res = next.call(req).await?;

    let error = res
        .response_mut()
        .extensions_mut()
        .remove::<BookingErrorKindResponse>();
    let (Some(request_id), Some(error)) = (request_id, error) else {
        return Ok(res.map_into_left_body());
    };

    let status = res.status();
    if status.is_server_error() {
        tracing::error!(%request_id, r#type = error.r#type, "{}", error.message);
    }

    let (req, _) = res.into_parts();
    let body = ErrorResponse {
        request_id: request_id.to_string(),
        error,
    };
    let res = HttpResponse::build(status).json(body);

    Ok(ServiceResponse::new(req, res).map_into_right_body())
}

pub fn configure(cfg: &mut web::ServiceConfig, db: Database) {
    cfg.app_data(db)
        .service(crate::api_route())
        .default_service(web::to(not_found));
}
