// src/noyau/jetons.rs
//
// Lecteur (tokenisation) : texte -> suite de jetons positionnés.
// Chaque jeton garde l'offset caractère de son premier caractère ; les
// offsets sont croissants et la suite est figée une fois produite.

use super::erreurs::ErreurCalcul;

/// Constantes nommées reconnues par le lecteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

/// Fonctions nommées reconnues par le lecteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Abs,
}

/// Littéral numérique brut : chaînes de chiffres, pas encore de valeur.
/// - `fraction` absente = entier (séparateur traînant inclus, voir tokenize)
/// - `exposant` garde son signe éventuel ("+3", "-12", "7")
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Litteral {
    pub entier: String,
    pub fraction: Option<String>,
    pub exposant: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreJeton {
    Nombre(Box<Litteral>),
    Const(Constante),
    Func(Fonction),

    Plus,
    Moins,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixe)
    Pipe,  // | (ouverture/fermeture ambiguë, tranchée par le normaliseur)

    LPar,
    RPar,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub genre: GenreJeton,
    pub pos: usize,
}

impl Jeton {
    fn new(genre: GenreJeton, pos: usize) -> Self {
        Jeton { genre, pos }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte :
/// - nombres décimaux (12, 12.5, .5, 1.) avec séparateur configurable ('.' ou ',')
/// - suffixe d'exposant : e/E, signe optionnel, au moins un chiffre (2e3, 2E-4)
/// - opérateurs + - * / ^ !
/// - parenthèses ( ) et barres de valeur absolue |
/// - identifiants en minuscules : pi, e (constantes), abs (fonction)
///
/// Un séparateur traînant sans chiffre ("1.") vaut "pas de fraction" ;
/// un second séparateur dans le même littéral est une erreur lexicale.
/// Un 'e' non suivi d'un chiffre (signé ou non) n'ouvre PAS d'exposant :
/// il reste disponible pour la table des identifiants ("2e" = 2·e,
/// "2e3" = 2000).
pub fn tokenize(s: &str, separateur_decimal: char) -> Result<Vec<Jeton>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Caractères simples
        let simple = match c {
            '(' => Some(GenreJeton::LPar),
            ')' => Some(GenreJeton::RPar),
            '+' => Some(GenreJeton::Plus),
            '-' => Some(GenreJeton::Moins),
            '*' => Some(GenreJeton::Star),
            '/' => Some(GenreJeton::Slash),
            '^' => Some(GenreJeton::Caret),
            '!' => Some(GenreJeton::Bang),
            '|' => Some(GenreJeton::Pipe),
            _ => None,
        };
        if let Some(genre) = simple {
            out.push(Jeton::new(genre, i));
            i += 1;
            continue;
        }

        // Nombre : un chiffre ou le séparateur décimal démarre un littéral
        if c.is_ascii_digit() || c == separateur_decimal {
            let debut = i;

            let mut entier = String::new();
            while i < chars.len() && chars[i].is_ascii_digit() {
                entier.push(chars[i]);
                i += 1;
            }

            let mut fraction = None;
            if i < chars.len() && chars[i] == separateur_decimal {
                i += 1;
                let mut f = String::new();
                while i < chars.len() && chars[i].is_ascii_digit() {
                    f.push(chars[i]);
                    i += 1;
                }
                // second séparateur dans le même littéral
                if i < chars.len() && chars[i] == separateur_decimal {
                    return Err(ErreurCalcul::NombreMalForme {
                        raison: "second séparateur décimal",
                        pos: i,
                    });
                }
                // séparateur traînant sans chiffre = pas de fraction
                if !f.is_empty() {
                    fraction = Some(f);
                }
            }

            if entier.is_empty() && fraction.is_none() {
                // séparateur isolé ("." tout seul)
                return Err(ErreurCalcul::NombreMalForme {
                    raison: "aucun chiffre",
                    pos: debut,
                });
            }

            // Suffixe d'exposant : e/E + signe optionnel + au moins un chiffre.
            // Sinon le 'e' reste pour la table des identifiants (constante e).
            let mut exposant = None;
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                let mut signe = None;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    signe = Some(chars[j]);
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    let mut x = String::new();
                    if let Some(sg) = signe {
                        x.push(sg);
                    }
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        x.push(chars[i]);
                        i += 1;
                    }
                    exposant = Some(x);
                }
            }

            out.push(Jeton::new(
                GenreJeton::Nombre(Box::new(Litteral {
                    entier,
                    fraction,
                    exposant,
                })),
                debut,
            ));
            continue;
        }

        // Identifiants : suite de minuscules ASCII, table fermée
        if c.is_ascii_lowercase() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let mot: String = chars[debut..i].iter().collect();

            let genre = match mot.as_str() {
                "pi" => GenreJeton::Const(Constante::Pi),
                "e" => GenreJeton::Const(Constante::E),
                "abs" => GenreJeton::Func(Fonction::Abs),
                _ => {
                    return Err(ErreurCalcul::IdentifiantInconnu {
                        nom: mot,
                        pos: debut,
                    })
                }
            };
            out.push(Jeton::new(genre, debut));
            continue;
        }

        return Err(ErreurCalcul::CaractereInattendu { caractere: c, pos: i });
    }

    Ok(out)
}

/// Format utilitaire (debug) : liste de jetons en texte.
/// Sérialiseur sans contenu algorithmique ; le séparateur de sortie est
/// toujours '.'.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for j in jetons {
        let s = match &j.genre {
            GenreJeton::Nombre(lit) => {
                let mut n = lit.entier.clone();
                if let Some(f) = &lit.fraction {
                    n.push('.');
                    n.push_str(f);
                }
                if let Some(x) = &lit.exposant {
                    n.push('e');
                    n.push_str(x);
                }
                n
            }
            GenreJeton::Const(Constante::Pi) => "pi".to_string(),
            GenreJeton::Const(Constante::E) => "e".to_string(),
            GenreJeton::Func(Fonction::Abs) => "abs".to_string(),

            GenreJeton::Plus => "+".to_string(),
            GenreJeton::Moins => "-".to_string(),
            GenreJeton::Star => "*".to_string(),
            GenreJeton::Slash => "/".to_string(),
            GenreJeton::Caret => "^".to_string(),
            GenreJeton::Bang => "!".to_string(),
            GenreJeton::Pipe => "|".to_string(),

            GenreJeton::LPar => "(".to_string(),
            GenreJeton::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
