pub mod art_pieces;
pub mod gallery;
pub mod health;
pub mod home;
