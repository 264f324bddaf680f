pub mod art_pieces;
pub mod gallery;
