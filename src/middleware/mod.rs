/*
 * Responsibility
 * - middleware の公開インターフェース
 * - cors::apply (outermost), auth::identity::apply (guard), http::apply (transport)
 */
pub mod auth;
pub mod cors;
pub mod http;
