// src/noyau/calcul.rs
//
// Point d'entrée du moteur : texte -> jetons -> jetons annotés -> fraction
// canonique -> texte. Chaque étage échoue vite avec un `ErreurCalcul`
// positionné dans le texte d'origine.

use super::erreurs::ErreurCalcul;
use super::eval::evaluer;
use super::format::{formater, ModeSortie};
use super::fraction::Fraction;
use super::jetons::tokenize;
use super::normalise::normaliser;

#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// '.' ou ',' selon la locale d'entrée.
    pub separateur_decimal: char,
    pub mode: ModeSortie,
    /// Décimales conservées en mode décimal (troncature, pas d'arrondi).
    pub max_decimales: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            separateur_decimal: '.',
            mode: ModeSortie::default(),
            max_decimales: 30,
        }
    }
}

/// Valeur exacte d'une expression, sous forme canonique.
pub fn evaluer_texte(texte: &str, options: &Options) -> Result<Fraction, ErreurCalcul> {
    let jetons = tokenize(texte, options.separateur_decimal)?;
    let annotes = normaliser(&jetons)?;
    evaluer(&annotes)
}

/// La chaîne complète : évalue puis met en forme selon les options.
pub fn evaluer_expression(texte: &str, options: &Options) -> Result<String, ErreurCalcul> {
    let valeur = evaluer_texte(texte, options)?;
    Ok(formater(&valeur, options.mode, options.max_decimales))
}
