use crate::cli::ServeArgs;
use crate::infra::{AppState, ConsoleMailer};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ke_academy::config::AppConfig;
use ke_academy::error::AppError;
use ke_academy::inquiry::InquiryService;
use ke_academy::schedule::{ScheduleCatalog, ScheduleNavigator, ScheduleState, SystemClock};
use ke_academy::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(ScheduleCatalog::embedded()?);
    let navigator = ScheduleNavigator::new(
        Arc::new(SystemClock),
        config.schedule.reference_timezone,
    );
    let schedule_state = ScheduleState { catalog, navigator };

    let mailer = Arc::new(ConsoleMailer::new(&config.contact));
    let inquiry_service = Arc::new(InquiryService::new(
        mailer,
        Arc::new(SystemClock),
        config.schedule.reference_timezone,
    ));

    let app = with_site_routes(inquiry_service, schedule_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "academy website backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
