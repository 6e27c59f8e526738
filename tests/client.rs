//! API and IBGE clients against servers bound on a loopback port.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use ecoleta::client::api::ImageFile;
use ecoleta::client::{ApiClient, ClientError, IbgeClient, Location};
use ecoleta::ui::{CreatePointForm, InputField, PointDetailView, PointsQuery};
use ecoleta::{app, AppState, MemoryStore, Settings};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

/// The real backend over a seeded in-memory store. Keep the `TempDir` alive
/// for the duration of the test.
async fn backend() -> (ApiClient, TempDir) {
    let uploads = tempfile::tempdir().expect("create uploads dir");
    let settings = Settings {
        uploads_dir: uploads.path().to_path_buf(),
        assets_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/assets").into(),
        ..Settings::default()
    };
    let state = AppState::new(Arc::new(MemoryStore::seeded()), &settings);
    let base = serve(app(state, settings.body_limit)).await;
    (ApiClient::new(&base).expect("api client"), uploads)
}

fn recife_form() -> CreatePointForm {
    CreatePointForm::new()
        .with_input(InputField::Name, "Recicla Recife")
        .with_input(InputField::Email, "contato@recicla.org")
        .with_input(InputField::Whatsapp, "5581999990000")
        .with_marker(-8.0476, -34.877)
        .select_uf("PE")
        .select_city("Recife")
        .toggle_item(1)
        .toggle_item(6)
}

#[tokio::test]
async fn submitted_form_loads_back_as_detail() {
    let (api, uploads) = backend().await;
    let image = ImageFile {
        file_name: "fachada.png".into(),
        bytes: b"\x89PNG fachada".to_vec(),
    };
    let created = recife_form().with_image(Some(image)).submit(&api).await.unwrap();
    assert!(created.point.image.ends_with("-fachada.png"));
    assert!(uploads.path().join(&created.point.image).is_file());

    let view = PointDetailView::load(&api, created.point.id).await.unwrap();
    assert_eq!(view.name(), "Recicla Recife");
    assert_eq!(view.items_line(), "Lâmpadas, Óleo de Cozinha");
    assert_eq!(view.address_line(), "Recife, PE");
    assert_eq!(view.image_url(), created.image_url);
}

#[tokio::test]
async fn missing_point_reports_server_message() {
    let (api, _uploads) = backend().await;
    let err = PointDetailView::load(&api, 999).await.unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert_eq!(message, "not found: point 999");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_submission_surfaces_validation_message() {
    let (api, _uploads) = backend().await;
    let err = recife_form()
        .with_input(InputField::Email, "not-an-email")
        .submit(&api)
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
            assert!(message.contains("email"), "{message}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn points_query_narrows_by_items() {
    let (api, _uploads) = backend().await;
    assert_eq!(api.items().await.unwrap().len(), 6);

    let recife = recife_form().submit(&api).await.unwrap();
    let olinda = recife_form().select_city("Olinda").toggle_item(1).toggle_item(6).toggle_item(3);
    olinda.submit(&api).await.unwrap();

    let all_recife = PointsQuery::new("PE", "Recife").fetch(&api).await.unwrap();
    assert_eq!(all_recife.len(), 1);
    assert_eq!(all_recife[0].point.id, recife.point.id);

    let paper_in_olinda = PointsQuery::new("PE", "Olinda").toggle_item(3).fetch(&api).await.unwrap();
    assert_eq!(paper_in_olinda.len(), 1);
    let oil_in_olinda = PointsQuery::new("PE", "Olinda").toggle_item(6).fetch(&api).await.unwrap();
    assert!(oil_in_olinda.is_empty());
}

async fn estados(Query(q): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    if q.get("orderBy").map(String::as_str) != Some("nome") {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!([
        { "id": 12, "sigla": "AC", "nome": "Acre", "regiao": { "id": 1, "sigla": "N", "nome": "Norte" } },
        { "id": 26, "sigla": "PE", "nome": "Pernambuco", "regiao": { "id": 2, "sigla": "NE", "nome": "Nordeste" } }
    ])))
}

async fn municipios(
    Path(uf): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    if q.get("orderBy").map(String::as_str) != Some("nome") {
        return Err((StatusCode::BAD_REQUEST, "orderBy missing"));
    }
    match uf.as_str() {
        "PE" => Ok(Json(json!([
            { "id": 2609600, "nome": "Olinda" },
            { "id": 2611606, "nome": "Recife" }
        ]))),
        _ => Err((StatusCode::SERVICE_UNAVAILABLE, "localidades indisponível")),
    }
}

async fn ibge_stub() -> IbgeClient {
    let router = Router::new()
        .route("/api/v1/localidades/estados", get(estados))
        .route("/api/v1/localidades/estados/:uf/municipios", get(municipios));
    IbgeClient::new(&serve(router).await).expect("ibge client")
}

#[tokio::test]
async fn ibge_ufs_and_cities_are_renamed() {
    let ibge = ibge_stub().await;
    assert_eq!(
        ibge.ufs().await.unwrap(),
        vec![
            Location { id: 12, name: "AC".into() },
            Location { id: 26, name: "PE".into() },
        ]
    );
    let cities: Vec<String> = ibge.cities("PE").await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(cities, vec!["Olinda", "Recife"]);
}

#[tokio::test]
async fn ibge_plain_text_error_is_kept_as_message() {
    let ibge = ibge_stub().await;
    match ibge.cities("SP").await.unwrap_err() {
        ClientError::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(message, "localidades indisponível");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
