//! Noyau d'évaluation exacte
//!
//! Organisation interne :
//! - erreurs.rs     : erreur unique, positionnée dans le texte source
//! - jetons.rs      : tokenisation (nombres, opérateurs, identifiants)
//! - normalise.rs   : unaire/binaire, multiplication implicite, barres |…|
//! - fraction.rs    : rationnel exact non canonique + politiques de croissance
//! - factorielle.rs : n! exact (produit direct / crible + Legendre)
//! - constantes.rs  : π et e rationnels à 40 chiffres, figés
//! - eval.rs        : shunting-yard itératif sur deux piles
//! - format.rs      : sortie décimale tronquée ou num/den
//! - calcul.rs      : pipeline complet + options

pub mod calcul;
pub mod constantes;
pub mod erreurs;
pub mod eval;
pub mod factorielle;
pub mod format;
pub mod fraction;
pub mod jetons;
pub mod normalise;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use calcul::{evaluer_expression, evaluer_texte, Options};
pub use erreurs::ErreurCalcul;
pub use format::ModeSortie;
