use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{error, info};

use crate::order::{Order, OrderResponse};
use crate::store::{OrderStore, StoreError};

const BANNER: &str = "===================================================";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        error!("Storage error: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/health", get(health))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> Result<Json<OrderResponse>, StoreError> {
    info!("{BANNER}");
    info!("ORDER RECEIVED");
    info!("{BANNER}");
    info!("{order}");
    info!("{BANNER}");

    let customer_name = order.customer_name.clone();
    let saved = state.store.create(order).await?;

    let message = if state.store.persists() {
        if let Some(id) = saved.id {
            info!("Order saved to the database with id: {id}");
        }
        "Order saved to the database".to_string()
    } else {
        "Order received".to_string()
    };

    Ok(Json(OrderResponse {
        status: "success".to_string(),
        message,
        customer_name,
    }))
}

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, StoreError> {
    let orders = state.store.list().await?;
    info!("Returning {} orders", orders.len());
    Ok(Json(orders))
}

pub async fn health() -> &'static str {
    info!("Health check received");
    "OK"
}
