// src/noyau/constantes.rs
//
// π et e sous forme de rationnels à 40 chiffres exacts, calculés une fois
// puis figés. Les constantes entrent dans le moteur comme n'importe quelle
// fraction; seule l'approximation initiale est tronquée.

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_traits::Zero;

use super::fraction::{pow10, Fraction};
use super::jetons::Constante;

/// Chiffres décimaux retenus pour π et e.
const CHIFFRES_CONSTANTES: u64 = 40;

/// arctan(1/q) en entier scalé (troncature) via série :
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inverse_scalee(q: i64, echelle: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut positif = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut somme = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let terme = echelle / &d;
        if terme.is_zero() {
            break;
        }

        if positif {
            somme += &terme;
        } else {
            somme -= &terme;
        }

        q_pow *= &q;
        q_pow *= &q;

        positif = !positif;
        k += 1;
    }

    somme
}

/// floor(π * 10^chiffres). Machin : π = 16*atan(1/5) - 4*atan(1/239),
/// avec des chiffres de garde pour amortir les troncatures.
fn pi_scalee(chiffres: u64) -> BigInt {
    let garde = 10u64;
    let echelle = pow10(chiffres + garde);

    let a = arctan_inverse_scalee(5, &echelle);
    let b = arctan_inverse_scalee(239, &echelle);

    let pi = BigInt::from(16) * a - BigInt::from(4) * b;
    pi / pow10(garde)
}

/// floor(e * 10^chiffres) via e = Σ 1/k!, termes scalés tronqués.
fn e_scalee(chiffres: u64) -> BigInt {
    let garde = 10u64;
    let echelle = pow10(chiffres + garde);

    let mut somme = BigInt::zero();
    let mut terme = echelle; // 1/0! scalé
    let mut k: u64 = 1;
    while !terme.is_zero() {
        somme += &terme;
        terme /= k;
        k += 1;
    }

    somme / pow10(garde)
}

pub fn valeur_constante(c: Constante) -> Fraction {
    static PI: OnceLock<Fraction> = OnceLock::new();
    static E: OnceLock<Fraction> = OnceLock::new();

    match c {
        Constante::Pi => PI
            .get_or_init(|| Fraction {
                num: pi_scalee(CHIFFRES_CONSTANTES),
                den: pow10(CHIFFRES_CONSTANTES),
            })
            .clone(),
        Constante::E => E
            .get_or_init(|| Fraction {
                num: e_scalee(CHIFFRES_CONSTANTES),
                den: pow10(CHIFFRES_CONSTANTES),
            })
            .clone(),
    }
}
