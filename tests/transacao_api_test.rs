use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pagamento_service::{
    AppState, create_app, error::MessageErrorResponseDto, models::dto::TransacaoResponseDto,
    repository::InMemoryTransacaoRepository,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(Arc::new(InMemoryTransacaoRepository::new())))
}

fn pagamento() -> Value {
    json!({
        "cartao": "4444********1234",
        "descricao": {
            "valor": 500.5,
            "dataHora": "2021-05-01T18:30:00",
            "estabelecimento": "PetShop Mundo cão",
            "nsu": "1234567890",
            "codigoAutorizacao": "147258369"
        },
        "formaPagamento": { "tipo": "PARCELADO_LOJA", "parcelas": 2 }
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn pagar(app: &Router) -> TransacaoResponseDto {
    let (status, body) = send(app, "POST", "/transacao/v1/pagar", Some(pagamento())).await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)
}

#[tokio::test]
async fn pagar_returns_authorized_transaction() {
    let app = app();

    let (status, body) = send(&app, "POST", "/transacao/v1/pagar", Some(pagamento())).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = parse(&body);
    assert_eq!(json["id"], 1);
    assert_eq!(json["cartao"], "4444********1234");
    assert_eq!(json["descricao"]["valor"], 500.5);
    assert_eq!(json["descricao"]["dataHora"], "2021-05-01T18:30:00");
    assert_eq!(json["descricao"]["codigoAutorizacao"], "147258369");
    assert_eq!(json["descricao"]["status"], "AUTORIZADO");
    assert_eq!(json["formaPagamento"]["tipo"], "PARCELADO_LOJA");
    assert_eq!(json["formaPagamento"]["parcelas"], 2);
}

#[tokio::test]
async fn buscar_returns_what_pagar_created() {
    let app = app();
    let created = pagar(&app).await;

    let (status, body) = send(&app, "GET", &format!("/transacao/v1/buscar/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<TransacaoResponseDto>(&body), created);
}

#[tokio::test]
async fn buscar_unknown_id_is_404_with_error_body() {
    let (status, body) = send(&app(), "GET", "/transacao/v1/buscar/999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: MessageErrorResponseDto = parse(&body);
    assert_eq!(error.status, 404);
    assert_eq!(error.error, "Not Found");
    assert_eq!(error.message, "Transação não encontrada");
}

#[tokio::test]
async fn listar_empty_store_is_404_not_empty_array() {
    let (status, body) = send(&app(), "GET", "/transacao/v1/listar", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: MessageErrorResponseDto = parse(&body);
    assert_eq!(error.message, "Nenhuma transação encontrada");
}

#[tokio::test]
async fn listar_returns_all_transactions() {
    let app = app();
    let first = pagar(&app).await;
    let second = pagar(&app).await;

    let (status, body) = send(&app, "GET", "/transacao/v1/listar", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Vec<TransacaoResponseDto>>(&body), vec![first, second]);
}

#[tokio::test]
async fn estornar_sets_negado_and_keeps_other_fields() {
    let app = app();
    let created = pagar(&app).await;

    let (status, body) = send(&app, "PUT", &format!("/transacao/v1/estornar/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let reversed: TransacaoResponseDto = parse(&body);
    let mut expected = created.clone();
    expected.descricao.status = pagamento_service::models::enums::StatusTransacao::Negado;
    assert_eq!(reversed, expected);

    // Second reversal is rejected
    let (status, body) = send(&app, "PUT", &format!("/transacao/v1/estornar/{}", created.id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<MessageErrorResponseDto>(&body).message, "Transação já estornada");
}

#[tokio::test]
async fn estornar_unknown_id_is_404() {
    let (status, _) = send(&app(), "PUT", "/transacao/v1/estornar/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_are_400() {
    let app = app();

    for (method, uri) in [
        ("PUT", "/transacao/v1/estornar/abc"),
        ("GET", "/transacao/v1/buscar/1.5"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");

        let error: MessageErrorResponseDto = parse(&body);
        assert_eq!(error.status, 400);
        assert_eq!(error.error, "Bad Request");
    }
}

#[tokio::test]
async fn invalid_payments_are_400_and_not_persisted() {
    let app = app();

    let mut zero_parcelas = pagamento();
    zero_parcelas["formaPagamento"]["parcelas"] = json!(0);

    let mut sem_estabelecimento = pagamento();
    if let Some(descricao) = sem_estabelecimento["descricao"].as_object_mut() {
        descricao.remove("estabelecimento");
    }

    let mut tipo_desconhecido = pagamento();
    tipo_desconhecido["formaPagamento"]["tipo"] = json!("BOLETO");

    for body in [zero_parcelas, sem_estabelecimento, tipo_desconhecido] {
        let (status, response) = send(&app, "POST", "/transacao/v1/pagar", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<MessageErrorResponseDto>(&response).status, 400);
    }

    let (status, _) = send(&app, "GET", "/transacao/v1/listar", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_field_is_named_in_message() {
    let mut body = pagamento();
    if let Some(descricao) = body["descricao"].as_object_mut() {
        descricao.remove("estabelecimento");
    }

    let (status, response) = send(&app(), "POST", "/transacao/v1/pagar", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: MessageErrorResponseDto = parse(&response);
    assert!(error.message.contains("estabelecimento"), "{}", error.message);
}

#[tokio::test]
async fn validation_message_uses_json_field_names() {
    let mut body = pagamento();
    body["formaPagamento"]["parcelas"] = json!(0);
    if let Some(descricao) = body["descricao"].as_object_mut() {
        descricao.remove("codigoAutorizacao");
    }

    let (status, response) = send(&app(), "POST", "/transacao/v1/pagar", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: MessageErrorResponseDto = parse(&response);
    assert_eq!(
        error.message,
        "descricao.codigoAutorizacao: é obrigatório; formaPagamento.parcelas: deve ser maior que 0"
    );
}

#[tokio::test]
async fn unknown_paths_are_404_with_error_body() {
    let app = app();

    for (method, uri) in [
        ("GET", "/transacao/v1/nada"),
        ("PUT", "/transacao/v1/estornar/"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");

        let error: MessageErrorResponseDto = parse(&body);
        assert_eq!(error.status, 404);
        assert_eq!(error.error, "Not Found");
        assert_eq!(error.message, "Recurso não encontrado");
    }
}

#[tokio::test]
async fn wrong_method_is_405_with_error_body() {
    let app = app();

    for (method, uri) in [
        ("DELETE", "/transacao/v1/listar"),
        ("GET", "/transacao/v1/pagar"),
        ("POST", "/health"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");

        let error: MessageErrorResponseDto = parse(&body);
        assert_eq!(error.status, 405);
        assert_eq!(error.error, "Method Not Allowed");
        assert_eq!(error.message, "Método não permitido");
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/transacao/v1/pagar")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_storage() {
    let (status, body) = send(&app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = parse(&body);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["storage"], "connected");
    assert!(health["timestamp"].is_string());
}
