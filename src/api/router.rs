use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, auth, bookings, hotels, messages, users};

/// Creates the API router with all hotel booking endpoints
///
/// Auth:
/// - POST /auth/sign-up, POST /auth/sign-in, POST /auth/sign-out, GET /auth/me
///
/// Hotels:
/// - GET /hotels (search), POST /hotels, POST /hotels/import
/// - GET | PATCH | DELETE /hotels/:id
/// - GET /hotels/:id/quote, GET | POST /hotels/:id/reviews, GET /hotels/:id/bookings
///
/// Bookings:
/// - POST /bookings, GET /bookings/:id
/// - POST /bookings/:id/confirm, POST /bookings/:id/cancel
///
/// Users:
/// - GET /users, GET | PATCH | DELETE /users/:id
/// - GET /users/:id/bookings, GET /users/:id/reviews
///
/// Messages:
/// - POST /messages, GET /messages/inbox, GET /messages/sent, GET /messages/with/:user_id
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Auth
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/me", get(auth::current_user))
        // Hotels
        .route("/hotels", get(hotels::list_hotels).post(hotels::add_hotel))
        .route("/hotels/import", post(hotels::import_catalog))
        .route(
            "/hotels/:id",
            get(hotels::get_hotel)
                .patch(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        .route("/hotels/:id/quote", get(hotels::quote_stay))
        .route(
            "/hotels/:id/reviews",
            get(hotels::hotel_reviews).post(hotels::add_review),
        )
        .route("/hotels/:id/bookings", get(hotels::hotel_bookings))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/confirm", post(bookings::confirm_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        // Users
        .route("/users", get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/bookings", get(users::user_bookings))
        .route("/users/:id/reviews", get(users::user_reviews))
        // Messages
        .route("/messages", post(messages::send_message))
        .route("/messages/inbox", get(messages::inbox))
        .route("/messages/sent", get(messages::sent))
        .route("/messages/with/:user_id", get(messages::conversation))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
