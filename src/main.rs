//! `ecoleta serve` runs the backend; the other subcommands browse and register
//! collection points against a running backend.

use clap::{Parser, Subcommand};
use ecoleta::client::api::ImageFile;
use ecoleta::client::{ApiClient, IbgeClient};
use ecoleta::settings::{DEFAULT_IBGE_URL, DEFAULT_PUBLIC_URL};
use ecoleta::ui::{CreatePointForm, InputField, LocationPicker, PointDetailView, PointsQuery};
use ecoleta::{app, apply_migrations, seed_items, AppState, MemoryStore, PgStore, Settings, StorageKind, Store};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecoleta", version, about = "Waste-collection point marketplace")]
struct Cli {
    /// Backend base URL for client commands.
    #[arg(long, env = "ECOLETA_API_URL", default_value = DEFAULT_PUBLIC_URL, global = true)]
    api_url: String,
    /// IBGE localities service root.
    #[arg(long, env = "IBGE_URL", default_value = DEFAULT_IBGE_URL, global = true)]
    ibge_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP backend (configured from the environment).
    Serve,
    /// List waste categories.
    Items,
    /// List collection points of a city, optionally narrowed to some items.
    Points {
        #[arg(long)]
        uf: String,
        #[arg(long)]
        city: String,
        /// Comma-separated item ids.
        #[arg(long, value_delimiter = ',')]
        items: Vec<i64>,
    },
    /// Show one collection point with its contact links.
    Point { id: i64 },
    /// List UFs from IBGE.
    Ufs,
    /// List the cities of a UF from IBGE.
    Cities { uf: String },
    /// Register a collection point.
    CreatePoint {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        whatsapp: String,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long)]
        uf: String,
        #[arg(long)]
        city: String,
        /// Comma-separated item ids.
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<i64>,
        /// Picture of the point.
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ecoleta=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => serve(Settings::from_env()?).await,
        Command::Items => {
            let api = ApiClient::new(&cli.api_url)?;
            for item in api.items().await? {
                println!("{:>3}  {:<22} {}", item.item.id, item.item.title, item.image_url);
            }
            Ok(())
        }
        Command::Points { uf, city, items } => {
            let picker = LocationPicker::new().select_uf(&uf).select_city(&city);
            let (uf, city) = picker.destination().ok_or("select a UF and a city")?;
            let query = PointsQuery::new(uf, city).with_items(items);
            let api = ApiClient::new(&cli.api_url)?;
            for p in query.fetch(&api).await? {
                println!("{:>4}  {}  ({}, {})", p.point.id, p.point.name, p.point.city, p.point.uf);
            }
            Ok(())
        }
        Command::Point { id } => {
            let api = ApiClient::new(&cli.api_url)?;
            let view = PointDetailView::load(&api, id).await?;
            println!("{}", view.name());
            println!("{}", view.items_line());
            println!("Endereço: {}", view.address_line());
            println!("Imagem:   {}", view.image_url());
            println!("WhatsApp: {}", view.whatsapp_link()?);
            println!("E-mail:   {}", view.mail_draft().mailto_url()?);
            Ok(())
        }
        Command::Ufs => {
            let ibge = IbgeClient::new(&cli.ibge_url)?;
            for uf in ibge.ufs().await? {
                println!("{}", uf.name);
            }
            Ok(())
        }
        Command::Cities { uf } => {
            let ibge = IbgeClient::new(&cli.ibge_url)?;
            for city in ibge.cities(&uf).await? {
                println!("{}", city.name);
            }
            Ok(())
        }
        Command::CreatePoint {
            name,
            email,
            whatsapp,
            latitude,
            longitude,
            uf,
            city,
            items,
            image,
        } => {
            let image = match image {
                Some(path) => Some(ImageFile::read(&path).await?),
                None => None,
            };
            let form = CreatePointForm::new()
                .with_input(InputField::Name, name)
                .with_input(InputField::Email, email)
                .with_input(InputField::Whatsapp, whatsapp)
                .with_marker(latitude, longitude)
                .with_image(image)
                .select_uf(&uf)
                .select_city(&city)
                .with_items(items);
            let api = ApiClient::new(&cli.api_url)?;
            let created = form.submit(&api).await?;
            println!("Ponto de coleta criado! id={}", created.point.id);
            Ok(())
        }
    }
}

async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn Store> = match settings.storage {
        StorageKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            apply_migrations(&pool).await?;
            seed_items(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::seeded())
        }
    };

    let state = AppState::new(store, &settings);
    let app = app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
