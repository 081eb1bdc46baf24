#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use rusqlite::Connection;
use serde_json::Value;
use tower::ServiceExt;

use vetsoft::api::{router, AppState};
use vetsoft::setup_database;

fn app() -> Router {
    let conn = Connection::open_in_memory().unwrap();
    setup_database(&conn).unwrap();
    router(AppState::new(conn))
}

fn encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

async fn read(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

async fn post(app: &Router, uri: &str, pairs: &[(&str, &str)]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode(pairs)))
        .unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

fn error_for<'a>(body: &'a Value, field: &str) -> &'a str {
    body["errors"][field].as_str().unwrap_or("")
}

const VALID_CLIENT: [(&str, &str); 4] = [
    ("name", "Juan Sebastian Veron"),
    ("phone", "54221555232"),
    ("address", "13 y 44"),
    ("email", "brujita75@vetsoft.com"),
];

fn client_with(key: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    VALID_CLIENT
        .iter()
        .map(|&(k, v)| if k == key { (k, value) } else { (k, v) })
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "OK");
}

// ============================================================================
// Clients
// ============================================================================

#[tokio::test]
async fn test_can_create_client() {
    let app = app();

    let (status, body) = post(&app, "/api/clients", &VALID_CLIENT).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Juan Sebastian Veron");

    let (status, body) = get(&app, "/api/clients").await;
    assert_eq!(status, StatusCode::OK);

    let clients = body["data"].as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Juan Sebastian Veron");
    assert_eq!(clients[0]["phone"], "54221555232");
    assert_eq!(clients[0]["address"], "13 y 44");
    assert_eq!(clients[0]["email"], "brujita75@vetsoft.com");
}

#[tokio::test]
async fn test_validation_errors_create_client() {
    let app = app();

    let (status, body) = post(&app, "/api/clients", &[]).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(error_for(&body, "name"), "Por favor ingrese un nombre");
    assert_eq!(error_for(&body, "phone"), "Por favor ingrese un teléfono");
    assert_eq!(error_for(&body, "email"), "Por favor ingrese un email");

    let (_, body) = get(&app, "/api/clients").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_client_field_rules() {
    let app = app();

    let cases = [
        ("email", "brujita75", "Por favor ingrese un email válido"),
        ("email", "rositac@gmail.com", "El email debe terminar con @vetsoft.com"),
        ("phone", "", "Por favor ingrese un teléfono"),
        (
            "phone",
            "111111111",
            "El número de teléfono debe comenzar con el prefijo 54 para Argentina",
        ),
        (
            "phone",
            "54aaa1111111",
            "El número de teléfono debe comenzar con el prefijo 54 para Argentina y solo puede contener números",
        ),
        ("name", "Juan123", "El nombre solo puede contener letras y espacios"),
    ];

    for (field, value, message) in cases {
        let (status, body) = post(&app, "/api/clients", &client_with(field, value)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{} = {:?}", field, value);
        assert_eq!(error_for(&body, field), message);
    }
}

#[tokio::test]
async fn test_edit_client_with_valid_data() {
    let app = app();
    let (_, body) = post(&app, "/api/clients", &VALID_CLIENT).await;
    let id = body["data"]["id"].as_i64().unwrap().to_string();

    let (status, _) = post(
        &app,
        "/api/clients",
        &[("id", id.as_str()), ("name", "Guido Carrillo"), ("phone", ""), ("email", "")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, &format!("/api/clients/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Guido Carrillo");
    assert_eq!(body["data"]["phone"], "54221555232");
    assert_eq!(body["data"]["email"], "brujita75@vetsoft.com");
    assert_eq!(body["data"]["address"], "13 y 44");
}

#[tokio::test]
async fn test_missing_client_is_404() {
    let app = app();

    let (status, body) = get(&app, "/api/clients/100").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = post(&app, "/api/clients", &[("id", "100"), ("name", "Nadie")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let (status, _) = post(&app(), "/api/clients", &[("id", "abc")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Providers
// ============================================================================

#[tokio::test]
async fn test_can_create_and_edit_provider() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/providers",
        &[
            ("name", "Proveedor de Prueba"),
            ("email", "proveedor@ejemplo.com"),
            ("address", "Calle Falsa 123"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap().to_string();

    let (status, body) = post(
        &app,
        "/api/providers",
        &[("id", id.as_str()), ("name", "Proveedor Actualizado")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Proveedor Actualizado");
    assert_eq!(body["data"]["email"], "proveedor@ejemplo.com");
    assert_eq!(body["data"]["address"], "Calle Falsa 123");
}

#[tokio::test]
async fn test_provider_validation() {
    let app = app();

    let (_, body) = post(&app, "/api/providers", &[]).await;
    assert_eq!(error_for(&body, "name"), "Por favor ingrese un nombre");
    assert_eq!(error_for(&body, "email"), "Por favor ingrese un email");

    let (_, body) = post(
        &app,
        "/api/providers",
        &[("name", "Juan Perez"), ("email", "invalid-email")],
    )
    .await;
    assert_eq!(error_for(&body, "email"), "Por favor ingrese un email valido");
}

// ============================================================================
// Pets
// ============================================================================

#[tokio::test]
async fn test_can_create_pet() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/pets",
        &[
            ("name", "Roma"),
            ("breed", "Labrador"),
            ("birthday", "2021-10-10"),
            ("weight", "10.158"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Roma");
    assert_eq!(body["data"]["breed"], "Labrador");
    assert_eq!(body["data"]["birthday"], "2021-10-10");
    assert_eq!(body["data"]["weight"], 10.158);
}

#[tokio::test]
async fn test_pet_validation() {
    let app = app();

    let pet = |breed: &'static str, birthday: &'static str, weight: &'static str| {
        vec![("name", "Roma"), ("breed", breed), ("birthday", birthday), ("weight", weight)]
    };

    let (_, body) = post(&app, "/api/pets", &pet("Labrador", "2021-10-10", "-10.000")).await;
    assert_eq!(error_for(&body, "weight"), "El peso debe ser un número mayor a cero");

    let (_, body) = post(&app, "/api/pets", &pet("Labrador", "2999-01-01", "10.252")).await;
    assert_eq!(
        error_for(&body, "birthday"),
        "La fecha de nacimiento no puede ser mayor o igual a la fecha actual"
    );

    let (_, body) = post(&app, "/api/pets", &pet("", "2021-10-10", "180.050")).await;
    assert_eq!(error_for(&body, "breed"), "Por favor seleccione una raza");
}

// ============================================================================
// Products, medicines, vets
// ============================================================================

#[tokio::test]
async fn test_product_price_must_be_positive() {
    let (status, body) = post(
        &app(),
        "/api/products",
        &[("name", "Paracetamol"), ("type", "Analgésico"), ("price", "0")],
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_for(&body, "price"), "El precio debe ser mayor que cero");
}

#[tokio::test]
async fn test_medicine_dose_range() {
    let app = app();

    let (_, body) = post(
        &app,
        "/api/medicines",
        &[("name", "Diclofenac"), ("description", "Calma el dolor muscular"), ("dose", "0")],
    )
    .await;
    assert_eq!(error_for(&body, "dose"), "La dosis debe estar en un rango de 1 a 10");

    let (status, body) = post(
        &app,
        "/api/medicines",
        &[("name", "Diclofenac"), ("description", "Calma el dolor muscular"), ("dose", "10")],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["dose"], 10);
}

#[tokio::test]
async fn test_vet_phone_rules() {
    let app = app();

    let (_, body) = post(
        &app,
        "/api/vets",
        &[("name", "Juan Perez"), ("phone", ""), ("email", "hola@vetsoft.com")],
    )
    .await;
    assert_eq!(error_for(&body, "phone"), "Por favor ingrese un teléfono");

    let (_, body) = post(
        &app,
        "/api/vets",
        &[("name", "Juan Sebastian Veron"), ("phone", "111111111"), ("email", "brujita75@vetsoft.com")],
    )
    .await;
    assert_eq!(
        error_for(&body, "phone"),
        "El número de teléfono debe comenzar con el prefijo 54 para Argentina"
    );
}

#[tokio::test]
async fn test_vet_specialties() {
    let app = app();

    let (status, body) = get(&app, "/api/vets/specialties").await;
    assert_eq!(status, StatusCode::OK);
    let choices = body["data"].as_array().unwrap();
    assert_eq!(choices.len(), 10);
    assert_eq!(choices[0], "Medicina interna");

    let (status, body) = post(
        &app,
        "/api/vets",
        &[
            ("name", "Ana Gomez"),
            ("phone", "5491100000"),
            ("email", "ana@vetsoft.com"),
            ("specialty", "Cardiología"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["specialty"], "Cardiología");
}
