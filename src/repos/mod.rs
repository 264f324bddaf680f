pub mod art_piece_repo;
pub mod error;
pub mod gallery_repo;

pub use art_piece_repo::{ArtPieceFields, ArtPieceRepo, ArtPieceRow};
pub use error::{RepoError, RepoResult};
pub use gallery_repo::{GalleryRepo, GalleryRow};
