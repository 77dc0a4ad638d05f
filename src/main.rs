use std::{io::Error, sync::Arc};

use mailing::{
    application::{
        handlers::webinar_notifier::WebinarNotificationHandler,
        services::{
            copywriter::CopywriterService,
            dispatch::{DispatchConfig, EmailDispatchService},
            webinar_mail::WebinarMailComposer,
        },
        usecases::{
            list_delivery_logs::ListDeliveryLogsUseCase,
            process_reminders::{ProcessRemindersUseCase, ReminderConfig},
            send_bulk_email::SendBulkEmailUseCase,
            send_confirmation::SendConfirmationUseCase,
            send_email::SendEmailUseCase,
            send_thank_you::SendThankYouUseCase,
        },
    },
    config::Config,
    domain::repositories::{DeliveryLogRepository, RegistrationRepository, WebinarRepository},
    infrastructure::{
        email::build_provider,
        llm::OpenAiTextGenerator,
        repositories::{
            in_memory::{
                InMemoryDeliveryLogRepository, InMemoryRegistrationRepository,
                InMemoryWebinarRepository,
            },
            postgres::{
                PostgresDeliveryLogRepository, PostgresRegistrationRepository,
                PostgresWebinarRepository,
            },
        },
        scheduler::ReminderTicker,
    },
    presentation::http::endpoints::root::{ApiState, endpoints},
};
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use sqlx::postgres::PgPoolOptions;
use tokio::main;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Repositories {
    delivery_logs: Arc<dyn DeliveryLogRepository>,
    webinars: Arc<dyn WebinarRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;
    let repositories = repositories(&config).await.map_err(Error::other)?;

    let dispatch = Arc::new(EmailDispatchService::new(
        build_provider(&config.email_provider),
        DispatchConfig {
            from_name: config.from_name.clone(),
            from_address: config.from_address.clone(),
            bulk_concurrency: config.bulk_concurrency,
        },
    ));

    let generator = match OpenAiTextGenerator::new(&config.llm) {
        Ok(generator) => Some(generator),
        Err(err) => {
            warn!(error = %err, "text generation disabled, copy endpoints will use templates");
            None
        }
    };

    let notifier = Arc::new(WebinarNotificationHandler::new(
        dispatch.clone(),
        repositories.delivery_logs.clone(),
        WebinarMailComposer::new(config.app_base_url.clone()),
    ));
    let process_reminders_usecase = Arc::new(ProcessRemindersUseCase::new(
        repositories.webinars.clone(),
        repositories.registrations.clone(),
        repositories.delivery_logs.clone(),
        notifier.clone(),
        ReminderConfig {
            dedupe: config.reminder_dedupe,
        },
    ));

    let state = Arc::new(ApiState {
        send_email_usecase: Arc::new(SendEmailUseCase::new(
            dispatch.clone(),
            repositories.delivery_logs.clone(),
        )),
        send_bulk_email_usecase: Arc::new(SendBulkEmailUseCase::new(
            dispatch.clone(),
            repositories.delivery_logs.clone(),
        )),
        list_delivery_logs_usecase: Arc::new(ListDeliveryLogsUseCase::new(
            repositories.delivery_logs.clone(),
        )),
        process_reminders_usecase: process_reminders_usecase.clone(),
        send_confirmation_usecase: Arc::new(SendConfirmationUseCase::new(
            repositories.webinars.clone(),
            repositories.registrations.clone(),
            notifier.clone(),
        )),
        send_thank_you_usecase: Arc::new(SendThankYouUseCase::new(
            repositories.webinars.clone(),
            repositories.registrations.clone(),
            notifier,
        )),
        copywriter: Arc::new(CopywriterService::new(generator)),
    });

    if let Some(ticker) = ReminderTicker::new(config.reminder_interval) {
        ticker.spawn(process_reminders_usecase);
    }

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);
    info!(%server_url, provider = dispatch.provider().as_str(), "starting server");

    let api_service = OpenApiService::new(endpoints(state), "Mailing API", "0.1.0")
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(app)
        .await
}

async fn repositories(config: &Config) -> anyhow::Result<Repositories> {
    let Some(database_url) = &config.database_url else {
        warn!("DATABASE_URL is not set, delivery logs and webinars are kept in memory");
        return Ok(Repositories {
            delivery_logs: Arc::new(InMemoryDeliveryLogRepository::new()),
            webinars: Arc::new(InMemoryWebinarRepository::new()),
            registrations: Arc::new(InMemoryRegistrationRepository::new()),
        });
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("connected to postgres, migrations applied");

    Ok(Repositories {
        delivery_logs: PostgresDeliveryLogRepository::new(pool.clone()),
        webinars: PostgresWebinarRepository::new(pool.clone()),
        registrations: PostgresRegistrationRepository::new(pool),
    })
}
