use std::collections::HashMap;
use std::net::TcpListener;
use std::time::Duration;

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpResponse, HttpServer};
use serde_json::Value;
use tracing_actix_web::TracingLogger;

use eth_rpc_client::models::jsonrpc::{JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND};

/// Canned answer of the fake node for one method.
#[derive(Clone)]
pub enum Reply {
    Result(Value),
    Error(i64, &'static str),
    Status(u16),
    Delayed(Duration, Value),
}

/// A fake Ethereum node serving canned JSON-RPC answers.
pub struct MockNode {
    pub url: String,
    handle: ServerHandle,
}

impl MockNode {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn handle_rpc(
    fixtures: web::Data<HashMap<String, Reply>>,
    request: web::Json<JsonRpcRequest<Vec<Value>>>,
) -> HttpResponse {
    let request = request.into_inner();
    match fixtures.get(&request.method) {
        Some(Reply::Result(result)) => {
            HttpResponse::Ok().json(JsonRpcResponse::success(request.id, result.clone()))
        }
        Some(Reply::Error(code, message)) => HttpResponse::Ok().json(JsonRpcResponse::error(
            request.id,
            *code,
            message.to_string(),
        )),
        Some(Reply::Status(code)) => {
            HttpResponse::build(StatusCode::from_u16(*code).expect("valid status code")).finish()
        }
        Some(Reply::Delayed(delay, result)) => {
            actix_rt::time::sleep(*delay).await;
            HttpResponse::Ok().json(JsonRpcResponse::success(request.id, result.clone()))
        }
        None => HttpResponse::Ok().json(JsonRpcResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("the method {} does not exist/is not available", request.method),
        )),
    }
}

/// Spawns a fake node on a free port and returns its handle and RPC URL.
///
/// # Panics
///
/// Panics if it fails to bind to a free port.
pub fn spawn_mock_node(fixtures: Vec<(&str, Reply)>) -> MockNode {
    // Bind to a free port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();

    let fixtures: HashMap<String, Reply> = fixtures
        .into_iter()
        .map(|(method, reply)| (method.to_string(), reply))
        .collect();
    let data = web::Data::new(fixtures);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .route("/", web::post().to(handle_rpc))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to start mock node")
    .run();

    let handle = server.handle();
    actix_rt::spawn(server);

    MockNode {
        url: format!("http://127.0.0.1:{}", port),
        handle,
    }
}
