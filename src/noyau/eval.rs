// src/noyau/eval.rs
//
// Évaluateur par précédence (shunting-yard) : une passe sur les jetons
// annotés, deux piles explicites (valeurs, opérateurs). Aucune récursion,
// donc la profondeur d'imbrication n'est bornée que par la mémoire.
//
// Table des précédences :
//   0  marqueurs ( et |          (jamais réduits par précédence)
//   1  + -
//   2  * /
//   4  + - unaires
//   6  ^                         (associatif à droite)
//   8  multiplication implicite
//   9  application de abs
//   10 factorielle               (postfixe, appliquée immédiatement)
//
// Règle de réduction : en empilant un opérateur, on réduit le sommet tant
// que sa précédence est >= à la nouvelle; STRICTEMENT > pour les préfixes
// et pour ^ (associativité à droite).

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use super::constantes::valeur_constante;
use super::erreurs::ErreurCalcul;
use super::factorielle::factorielle;
use super::fraction::{pow10, Fraction};
use super::jetons::Litteral;
use super::normalise::{GenreAnnote, JetonAnnote};

/// Limite sur les chiffres de fraction d'un littéral et sur la grandeur
/// d'un exposant décimal.
pub const PRECISION_MAX: usize = 50_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    // marqueurs de portée
    ParOuvre,
    AbsOuvre,

    Add,
    Sub,
    Mul,
    Div,
    Pow,
    PlusUnaire,
    MoinsUnaire,
    MulImplicite,
    Abs,
}

#[derive(Clone, Copy, Debug)]
struct OpEmpile {
    op: Op,
    pos: usize,
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::ParOuvre | Op::AbsOuvre => 0,
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
        Op::PlusUnaire | Op::MoinsUnaire => 4,
        Op::Pow => 6,
        Op::MulImplicite => 8,
        Op::Abs => 9,
    }
}

fn est_prefixe(op: Op) -> bool {
    matches!(op, Op::PlusUnaire | Op::MoinsUnaire | Op::Abs)
}

/// Valeur exacte d'un littéral : chiffres -> num/den, exposant appliqué
/// au numérateur (e > 0) ou au dénominateur (e < 0), réduction immédiate
/// si la valeur est fractionnaire.
fn valeur_litterale(lit: &Litteral, pos: usize) -> Result<Fraction, ErreurCalcul> {
    let mut chiffres = lit.entier.clone();
    let mut decalage: i64 = 0;

    if let Some(f) = &lit.fraction {
        if f.len() > PRECISION_MAX {
            return Err(ErreurCalcul::PrecisionMax {
                chiffres: f.len(),
                limite: PRECISION_MAX,
                pos,
            });
        }
        chiffres.push_str(f);
        decalage -= f.len() as i64;
    }

    if let Some(x) = &lit.exposant {
        let brut = x.strip_prefix('+').unwrap_or(x);
        // hors de portée de i64 = très au-delà de la limite de précision
        let exposant: i64 = match brut.parse() {
            Ok(e) => e,
            Err(_) => {
                return Err(ErreurCalcul::PrecisionMax {
                    chiffres: brut.trim_start_matches('-').len(),
                    limite: PRECISION_MAX,
                    pos,
                })
            }
        };
        if exposant.unsigned_abs() > PRECISION_MAX as u64 {
            return Err(ErreurCalcul::PrecisionMax {
                chiffres: exposant.unsigned_abs() as usize,
                limite: PRECISION_MAX,
                pos,
            });
        }
        decalage += exposant;
    }

    let mut num = BigInt::zero();
    for c in chiffres.bytes() {
        num = num * 10u32 + (c - b'0');
    }

    if decalage >= 0 {
        num *= pow10(decalage as u64);
        return Ok(Fraction::entiere(num));
    }
    let den = pow10(decalage.unsigned_abs());
    Ok(Fraction::simplifiee(num, den))
}

/// Réduit un opérateur empilé contre la pile de valeurs. Un marqueur qui
/// arrive ici n'a jamais trouvé son fermant.
fn appliquer(valeurs: &mut Vec<Fraction>, e: OpEmpile) -> Result<(), ErreurCalcul> {
    let pos = e.pos;

    if matches!(e.op, Op::ParOuvre | Op::AbsOuvre) {
        return Err(ErreurCalcul::DelimiteurNonApparie { pos });
    }

    let droite = valeurs
        .pop()
        .ok_or(ErreurCalcul::FinInattendue { pos: Some(pos) })?;

    if est_prefixe(e.op) {
        let v = match e.op {
            Op::PlusUnaire => droite,
            Op::MoinsUnaire => droite.negatif(),
            _ => droite.valeur_absolue(),
        };
        valeurs.push(v);
        return Ok(());
    }

    let gauche = valeurs
        .pop()
        .ok_or(ErreurCalcul::OperandesInsuffisants { pos })?;

    let v = match e.op {
        Op::Add => gauche.plus(&droite),
        Op::Sub => gauche.moins(&droite),
        Op::Mul | Op::MulImplicite => gauche.fois(&droite),
        Op::Div => {
            if droite.num.is_zero() {
                return Err(ErreurCalcul::DivisionParZero { pos });
            }
            gauche.diviser(&droite)
        }
        Op::Pow => {
            let exposant = droite.canonique();
            if !exposant.est_entiere() {
                return Err(ErreurCalcul::ExposantFractionnaire { pos });
            }
            let (base, grandeur) = if exposant.num.is_negative() {
                if gauche.num.is_zero() {
                    return Err(ErreurCalcul::DivisionParZero { pos });
                }
                (gauche.inverse(), (-&exposant.num).to_u64())
            } else {
                (gauche, exposant.num.to_u64())
            };
            let grandeur = grandeur.ok_or(ErreurCalcul::ExposantTropGrand { pos })?;
            base.puissance_entiere(grandeur)
        }
        _ => unreachable!("préfixes et marqueurs traités plus haut"),
    };
    valeurs.push(v);
    Ok(())
}

/// Empile `nouveau` après avoir réduit les opérateurs plus liants.
fn pousser(
    valeurs: &mut Vec<Fraction>,
    ops: &mut Vec<OpEmpile>,
    nouveau: Op,
    pos: usize,
) -> Result<(), ErreurCalcul> {
    let p = precedence(nouveau);
    let strict = est_prefixe(nouveau) || nouveau == Op::Pow;

    loop {
        let reduire = match ops.last() {
            None => false,
            Some(sommet) => {
                let ps = precedence(sommet.op);
                ps != 0 && if strict { ps > p } else { ps >= p }
            }
        };
        if !reduire {
            break;
        }
        if let Some(e) = ops.pop() {
            appliquer(valeurs, e)?;
        }
    }

    ops.push(OpEmpile { op: nouveau, pos });
    Ok(())
}

/// Dépile jusqu'au marqueur `ouvrant` en réduisant tout sur le chemin.
fn fermer(
    valeurs: &mut Vec<Fraction>,
    ops: &mut Vec<OpEmpile>,
    ouvrant: Op,
    pos: usize,
) -> Result<(), ErreurCalcul> {
    loop {
        let e = ops
            .pop()
            .ok_or(ErreurCalcul::DelimiteurNonApparie { pos })?;
        if e.op == ouvrant {
            return Ok(());
        }
        if matches!(e.op, Op::ParOuvre | Op::AbsOuvre) {
            // mauvais fermant pour ce marqueur
            return Err(ErreurCalcul::DelimiteurNonApparie { pos });
        }
        appliquer(valeurs, e)?;
    }
}

pub fn evaluer(jetons: &[JetonAnnote]) -> Result<Fraction, ErreurCalcul> {
    if jetons.is_empty() {
        return Err(ErreurCalcul::ExpressionVide);
    }

    let mut valeurs: Vec<Fraction> = Vec::new();
    let mut ops: Vec<OpEmpile> = Vec::new();

    for jeton in jetons {
        let pos = jeton.pos;
        match &jeton.genre {
            GenreAnnote::Nombre(lit) => valeurs.push(valeur_litterale(lit, pos)?),
            GenreAnnote::Const(c) => valeurs.push(valeur_constante(*c)),

            GenreAnnote::Func(_) => pousser(&mut valeurs, &mut ops, Op::Abs, pos)?,

            GenreAnnote::Plus => pousser(&mut valeurs, &mut ops, Op::Add, pos)?,
            GenreAnnote::Moins => pousser(&mut valeurs, &mut ops, Op::Sub, pos)?,
            GenreAnnote::Star => pousser(&mut valeurs, &mut ops, Op::Mul, pos)?,
            GenreAnnote::Slash => pousser(&mut valeurs, &mut ops, Op::Div, pos)?,
            GenreAnnote::Caret => pousser(&mut valeurs, &mut ops, Op::Pow, pos)?,
            GenreAnnote::PlusUnaire => pousser(&mut valeurs, &mut ops, Op::PlusUnaire, pos)?,
            GenreAnnote::MoinsUnaire => pousser(&mut valeurs, &mut ops, Op::MoinsUnaire, pos)?,
            GenreAnnote::MulImplicite => pousser(&mut valeurs, &mut ops, Op::MulImplicite, pos)?,

            // postfixe le plus liant : appliquée sur-le-champ
            GenreAnnote::Bang => {
                let v = valeurs
                    .pop()
                    .ok_or(ErreurCalcul::FinInattendue { pos: Some(pos) })?
                    .canonique();
                if !v.est_entiere() || v.num.is_negative() {
                    return Err(ErreurCalcul::DomaineFactorielle {
                        raison: "l'opérande doit être un entier positif ou nul",
                        pos,
                    });
                }
                let n = v.num.to_u64().ok_or(ErreurCalcul::DomaineFactorielle {
                    raison: "opérande trop grand",
                    pos,
                })?;
                valeurs.push(Fraction::entiere(factorielle(n)));
            }

            GenreAnnote::LPar => ops.push(OpEmpile {
                op: Op::ParOuvre,
                pos,
            }),
            GenreAnnote::AbsOuvre => ops.push(OpEmpile {
                op: Op::AbsOuvre,
                pos,
            }),

            GenreAnnote::RPar => fermer(&mut valeurs, &mut ops, Op::ParOuvre, pos)?,
            GenreAnnote::AbsFerme => {
                fermer(&mut valeurs, &mut ops, Op::AbsOuvre, pos)?;
                let v = valeurs
                    .pop()
                    .ok_or(ErreurCalcul::FinInattendue { pos: Some(pos) })?;
                valeurs.push(v.valeur_absolue());
            }
        }
    }

    // fin de flux : tout réduire; un marqueur restant = ouvrant sans fermant
    while let Some(e) = ops.pop() {
        appliquer(&mut valeurs, e)?;
    }

    let resultat = valeurs
        .pop()
        .ok_or(ErreurCalcul::FinInattendue { pos: None })?;
    Ok(resultat.canonique())
}
