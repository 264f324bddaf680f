/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置かないもの
 *  - parse ロジック / extractor 実装
 */
use super::core::PathId;

// art pieces
pub enum ArtPieceTag {}
pub type ArtPieceId = PathId<ArtPieceTag>;
