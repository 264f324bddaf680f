/*
 * Responsibility
 * - handler が受け取る型付き入力 (identity, path id, JSON body)
 * - 失敗は AppError (403 / 400) に変換する
 */
mod identity;
mod json_body;
pub mod path_id;

pub use identity::AuthIdentity;
pub use json_body::JsonBody;
pub use path_id::ArtPieceId;
