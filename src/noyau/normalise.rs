// src/noyau/normalise.rs
//
// Normaliseur : suite de jetons -> suite de jetons annotés.
// Une seule passe gauche -> droite sur le préfixe déjà annoté :
// - tranche unaire / binaire pour + et -
// - insère la multiplication implicite (2(3), (2)(3), 2pi, 3!2, ...)
// - apparie les barres | en AbsOuvre / AbsFerme (compteur de portées)
// - valide la syntaxe (opérateur binaire en contexte unaire, parenthèses
//   vides, nombre collé à un nombre, fin d'expression pendante)
//
// Les jetons synthétisés héritent de la position du jeton déclencheur.
// La suite produite est figée, consommée une seule fois par l'évaluateur.

use super::erreurs::ErreurCalcul;
use super::jetons::{Constante, Fonction, GenreJeton, Jeton, Litteral};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreAnnote {
    Nombre(Box<Litteral>),
    Const(Constante),
    Func(Fonction),

    Plus,
    Moins,
    Star,
    Slash,
    Caret,
    Bang,

    LPar,
    RPar,

    // synthétisés
    PlusUnaire,
    MoinsUnaire,
    MulImplicite,
    AbsOuvre,
    AbsFerme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JetonAnnote {
    pub genre: GenreAnnote,
    pub pos: usize,
}

/// "Terminal d'opérande" : jeton qui laisse une valeur au sommet de la pile
/// conceptuelle (un opérande complet vient de se terminer juste avant).
fn est_terminal(g: &GenreAnnote) -> bool {
    matches!(
        g,
        GenreAnnote::Nombre(_)
            | GenreAnnote::Const(_)
            | GenreAnnote::RPar
            | GenreAnnote::AbsFerme
            | GenreAnnote::Bang
    )
}

fn est_operateur(g: &GenreAnnote) -> bool {
    matches!(
        g,
        GenreAnnote::Plus
            | GenreAnnote::Moins
            | GenreAnnote::Star
            | GenreAnnote::Slash
            | GenreAnnote::Caret
            | GenreAnnote::PlusUnaire
            | GenreAnnote::MoinsUnaire
            | GenreAnnote::MulImplicite
    )
}

pub fn normaliser(jetons: &[Jeton]) -> Result<Vec<JetonAnnote>, ErreurCalcul> {
    let mut sortie: Vec<JetonAnnote> = Vec::with_capacity(jetons.len());
    let mut profondeur_abs: usize = 0;

    for jeton in jetons {
        let pos = jeton.pos;

        // état du préfixe déjà annoté
        let terminal_avant = sortie.last().map(|a| est_terminal(&a.genre)).unwrap_or(false);
        let contexte_unaire = match sortie.last() {
            None => true,
            Some(a) => {
                matches!(a.genre, GenreAnnote::LPar | GenreAnnote::AbsOuvre)
                    || est_operateur(&a.genre)
            }
        };
        let apres_nombre = matches!(
            sortie.last(),
            Some(a) if matches!(a.genre, GenreAnnote::Nombre(_))
        );
        let apres_lpar = matches!(
            sortie.last(),
            Some(a) if matches!(a.genre, GenreAnnote::LPar)
        );

        match &jeton.genre {
            GenreJeton::Nombre(lit) => {
                // deux littéraux collés ("1 2") : erreur, pas de produit implicite
                if apres_nombre {
                    return Err(ErreurCalcul::OperateurManquant { pos });
                }
                if terminal_avant {
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::MulImplicite,
                        pos,
                    });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::Nombre(lit.clone()),
                    pos,
                });
            }

            GenreJeton::Const(c) => {
                if terminal_avant {
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::MulImplicite,
                        pos,
                    });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::Const(*c),
                    pos,
                });
            }

            GenreJeton::Func(f) => {
                if terminal_avant {
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::MulImplicite,
                        pos,
                    });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::Func(*f),
                    pos,
                });
            }

            GenreJeton::LPar => {
                if terminal_avant {
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::MulImplicite,
                        pos,
                    });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::LPar,
                    pos,
                });
            }

            GenreJeton::RPar => {
                if apres_lpar {
                    return Err(ErreurCalcul::ParenthesesVides { pos });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::RPar,
                    pos,
                });
            }

            GenreJeton::Plus | GenreJeton::Moins => {
                let moins = matches!(jeton.genre, GenreJeton::Moins);
                let genre = if contexte_unaire {
                    if moins {
                        GenreAnnote::MoinsUnaire
                    } else {
                        GenreAnnote::PlusUnaire
                    }
                } else if moins {
                    GenreAnnote::Moins
                } else {
                    GenreAnnote::Plus
                };
                sortie.push(JetonAnnote { genre, pos });
            }

            GenreJeton::Star | GenreJeton::Slash | GenreJeton::Caret => {
                if contexte_unaire {
                    let operateur = match jeton.genre {
                        GenreJeton::Star => '*',
                        GenreJeton::Slash => '/',
                        _ => '^',
                    };
                    return Err(ErreurCalcul::OperateurInattendu { operateur, pos });
                }
                let genre = match jeton.genre {
                    GenreJeton::Star => GenreAnnote::Star,
                    GenreJeton::Slash => GenreAnnote::Slash,
                    _ => GenreAnnote::Caret,
                };
                sortie.push(JetonAnnote { genre, pos });
            }

            GenreJeton::Bang => {
                // la factorielle exige un opérande complet juste avant
                if !terminal_avant {
                    return Err(ErreurCalcul::OperateurInattendu {
                        operateur: '!',
                        pos,
                    });
                }
                sortie.push(JetonAnnote {
                    genre: GenreAnnote::Bang,
                    pos,
                });
            }

            GenreJeton::Pipe => {
                if terminal_avant && profondeur_abs > 0 {
                    // ferme la portée ouverte la plus interne
                    profondeur_abs -= 1;
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::AbsFerme,
                        pos,
                    });
                } else {
                    // ouvre une portée (produit implicite si un opérande précède)
                    if terminal_avant {
                        sortie.push(JetonAnnote {
                            genre: GenreAnnote::MulImplicite,
                            pos,
                        });
                    }
                    profondeur_abs += 1;
                    sortie.push(JetonAnnote {
                        genre: GenreAnnote::AbsOuvre,
                        pos,
                    });
                }
            }
        }
    }

    // validation de fin de flux
    if let Some(dernier) = sortie.last() {
        let raison = match dernier.genre {
            GenreAnnote::Plus
            | GenreAnnote::Moins
            | GenreAnnote::Star
            | GenreAnnote::Slash
            | GenreAnnote::Caret
            | GenreAnnote::MulImplicite => Some("opérateur binaire traînant"),
            GenreAnnote::PlusUnaire | GenreAnnote::MoinsUnaire => {
                Some("opérateur unaire traînant")
            }
            GenreAnnote::Func(_) => Some("fonction sans argument"),
            _ => None,
        };
        if let Some(raison) = raison {
            return Err(ErreurCalcul::ExpressionIncomplete {
                raison,
                pos: dernier.pos,
            });
        }
        if profondeur_abs > 0 {
            return Err(ErreurCalcul::ExpressionIncomplete {
                raison: "barre de valeur absolue non fermée",
                pos: dernier.pos,
            });
        }
    }

    Ok(sortie)
}
