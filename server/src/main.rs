use std::sync::Arc;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use actix_web::web::Data;
use lib::*;
use dotenv::dotenv;
use log::*;
use simplelog::{ColorChoice, Config as SimpleLogConfig, TermLogger, TerminalMode};
use time_series::{ChartConfig, ChartSeries, Plot, StockSample};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Where this surface gets its samples: the real backend, or the in-process
/// simulator when SIMULATE=true.
pub enum AppSource {
    Http(Client),
    Simulated(SimulatedSource),
}

impl AppSource {
    pub async fn stock_data(&self, symbol: Symbol) -> TickerwatchResult<Vec<StockSample>> {
        match self {
            AppSource::Http(client) => client.stock_data(symbol).await,
            AppSource::Simulated(sim) => sim.stock_data(symbol).await,
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logger();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    let simulate = std::env::var("SIMULATE")
        .map(|raw| raw.parse::<bool>())
        .unwrap_or(Ok(false))?;
    let source = match simulate {
        true => AppSource::Simulated(SimulatedSource::default()),
        false => {
            let api_url =
                std::env::var("STOCK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
            AppSource::Http(Client::new(api_url)?)
        }
    };

    let state = Data::new(Arc::new(source));

    HttpServer::new(move || {
        App::new()
            .app_data(Data::clone(&state))
            .service(symbols)
            .service(chart)
            .service(chart_plot)
            .route("/", web::get().to(test))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)
}

fn init_logger() {
    TermLogger::init(
        LevelFilter::Info,
        SimpleLogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");
}

async fn test() -> impl Responder {
    HttpResponse::Ok().body("Server is running...")
}

#[get("/symbols")]
async fn symbols() -> TickerwatchResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Symbol::all().map(|s| s.as_str())))
}

#[get("/chart/{symbol}")]
async fn chart(
    source: Data<Arc<AppSource>>,
    path: web::Path<String>,
) -> TickerwatchResult<HttpResponse> {
    let symbol = path.into_inner().parse::<Symbol>()?;
    let samples = source.stock_data(symbol).await?;
    let series = ChartSeries::from_samples(&samples);
    Ok(HttpResponse::Ok().json(ChartConfig::new(symbol.as_str(), &series)))
}

#[get("/chart/{symbol}/plot")]
async fn chart_plot(
    source: Data<Arc<AppSource>>,
    path: web::Path<String>,
) -> TickerwatchResult<HttpResponse> {
    let symbol = path.into_inner().parse::<Symbol>()?;
    let samples = source.stock_data(symbol).await?;
    let series = ChartSeries::from_samples(&samples);

    let out_file = &format!(
        "{}/{}.png",
        env!("CARGO_MANIFEST_DIR"),
        symbol.as_str().to_lowercase()
    );
    let config = ChartConfig::new(symbol.as_str(), &series);
    Plot::stock_chart(&series, out_file, &config.options.plugins.title.text)?;
    info!("Rendered {} chart to {}", symbol, out_file);
    Ok(HttpResponse::Ok().body("Ok"))
}
