// src/noyau/erreurs.rs
//
// Erreur unique pour toute la chaîne (lexème -> normalisation -> évaluation).
// Chaque variante porte l'offset en caractères dans le texte source quand il
// existe; `position()` l'expose pour le diagnostic en sortie.

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalcul {
    /* ------------------------ lexème ------------------------ */
    #[error("caractère inattendu '{caractere}' (position {pos})")]
    CaractereInattendu { caractere: char, pos: usize },

    #[error("nombre mal formé : {raison} (position {pos})")]
    NombreMalForme { raison: &'static str, pos: usize },

    #[error("identifiant inconnu '{nom}' (position {pos})")]
    IdentifiantInconnu { nom: String, pos: usize },

    /* ------------------------ syntaxe ------------------------ */
    #[error("opérateur inattendu '{operateur}' (position {pos})")]
    OperateurInattendu { operateur: char, pos: usize },

    #[error("parenthèses vides (position {pos})")]
    ParenthesesVides { pos: usize },

    #[error("opérateur manquant entre deux nombres (position {pos})")]
    OperateurManquant { pos: usize },

    #[error("expression incomplète : {raison} (position {pos})")]
    ExpressionIncomplete { raison: &'static str, pos: usize },

    #[error("délimiteur non apparié (position {pos})")]
    DelimiteurNonApparie { pos: usize },

    #[error("expression vide")]
    ExpressionVide,

    /* ------------------------ évaluation ------------------------ */
    #[error("fin inattendue de l'expression")]
    FinInattendue { pos: Option<usize> },

    #[error("opérandes insuffisants (position {pos})")]
    OperandesInsuffisants { pos: usize },

    #[error("division par zéro (position {pos})")]
    DivisionParZero { pos: usize },

    #[error("factorielle : {raison} (position {pos})")]
    DomaineFactorielle { raison: &'static str, pos: usize },

    #[error("exposant doit être entier (position {pos})")]
    ExposantFractionnaire { pos: usize },

    #[error("exposant trop grand (position {pos})")]
    ExposantTropGrand { pos: usize },

    #[error("précision maximale dépassée : {chiffres} chiffres (limite {limite}, position {pos})")]
    PrecisionMax {
        chiffres: usize,
        limite: usize,
        pos: usize,
    },
}

impl ErreurCalcul {
    /// Offset en caractères dans le texte source, si l'erreur en porte un.
    pub fn position(&self) -> Option<usize> {
        use ErreurCalcul::*;
        match self {
            CaractereInattendu { pos, .. }
            | NombreMalForme { pos, .. }
            | IdentifiantInconnu { pos, .. }
            | OperateurInattendu { pos, .. }
            | ParenthesesVides { pos }
            | OperateurManquant { pos }
            | ExpressionIncomplete { pos, .. }
            | DelimiteurNonApparie { pos }
            | OperandesInsuffisants { pos }
            | DivisionParZero { pos }
            | DomaineFactorielle { pos, .. }
            | ExposantFractionnaire { pos }
            | ExposantTropGrand { pos }
            | PrecisionMax { pos, .. } => Some(*pos),
            FinInattendue { pos } => *pos,
            ExpressionVide => None,
        }
    }
}
