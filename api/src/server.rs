use anyhow::Context;
use axum::{Router, extract::MatchedPath, http::{HeaderName, HeaderValue, Request}};
use roster_common::views::ApiErrorResponse;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer}, trace::TraceLayer};
use tracing::info_span;
use utoipa::{
    ToSchema,
    openapi::{
        Info, License, OpenApi, RefOr,
        path::Operation,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{config::ApiConfig, context::ApiContext, handlers};

const REQUEST_ID_HEADER: &str = "x-request-id";
const UNAUTHENTICATED_PATHS: &[&str] = &["/health"];

/// Build the routed application together with its OpenAPI document.
pub fn make(context: ApiContext) -> anyhow::Result<(Router, OpenApi)> {
    let (r, a) = api().split_for_parts();

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    // Log the request ID as generated
                    let request_id = req.headers().get(REQUEST_ID_HEADER);
                    let span = info_span!(
                        "http_request",
                        method = req.method().to_string(),
                        request_id = Option::<&str>::None,
                        path = Option::<&str>::None,
                    );

                    if let Some(request_id) = request_id.and_then(|v| v.to_str().ok()) {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(cors(&context.config)?)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )));

    let router = r
        .with_state(context)
        .fallback(handlers::not_found)
        .layer(middleware);

    Ok((router, document(a)))
}

/// The OpenAPI document alone, without wiring up storage or auth.
pub fn openapi() -> OpenApi {
    let (_, a) = api().split_for_parts();
    document(a)
}

fn api() -> OpenApiRouter<ApiContext> {
    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("Roster API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build()
                ))
        )
        .build();

    OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::health_check))
        .routes(routes!(handlers::users::list_users, handlers::users::create_user))
        .routes(routes!(
            handlers::users::get_user,
            handlers::users::update_user,
            handlers::users::delete_user
        ))
}

fn cors(cfg: &ApiConfig) -> anyhow::Result<CorsLayer> {
    let origin = cfg
        .public_url
        .parse::<HeaderValue>()
        .with_context(|| format!("public URL {:?} is not a valid origin", cfg.public_url))?;

    Ok(CorsLayer::new()
        .allow_credentials(true)
        .allow_origin(origin))
}

fn document(mut a: OpenApi) -> OpenApi {
    a.components
        .get_or_insert_with(Default::default)
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );

    a.paths.paths.iter_mut().for_each(|(path, item)| {
        let authenticated = !UNAUTHENTICATED_PATHS.contains(&path.as_str());
        for op in [
            &mut item.get,
            &mut item.post,
            &mut item.patch,
            &mut item.put,
            &mut item.delete,
            &mut item.trace,
            &mut item.head,
            &mut item.options,
        ] {
            apply_default_errors(op, authenticated);
        }
    });

    a
}

fn apply_default_errors(item: &mut Option<Operation>, authenticated: bool) {
    if let Some(item) = item {
        if authenticated {
            item.responses.responses.insert(
                "401".into(),
                RefOr::Ref(
                    utoipa::openapi::Ref::builder()
                        .summary("Unauthorized")
                        .ref_location_from_schema_name(ApiErrorResponse::name())
                        .build()
                )
            );
        }

        item.responses.responses.insert(
            "500".into(),
            RefOr::Ref(
                utoipa::openapi::Ref::builder()
                    .summary("Internal server error")
                    .ref_location_from_schema_name(ApiErrorResponse::name())
                    .build()
            )
        );
    }
}
