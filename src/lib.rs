// src/lib.rs

pub mod noyau;

pub use noyau::{evaluer_expression, evaluer_texte, ErreurCalcul, ModeSortie, Options};
