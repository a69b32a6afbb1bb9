// src/noyau/format.rs
//
// Sortie texte d'une fraction : décimal tronqué (défaut) ou num/den.
// Le décimal est obtenu par division scalée (×10^chiffres), puis les
// zéros de queue sont retirés; une partie décimale entièrement tronquée
// redonne l'entier seul, jamais "-0".

use num_traits::{Signed, Zero};

use super::fraction::{pow10, Fraction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeSortie {
    #[default]
    Decimal,
    Fraction,
}

pub fn formater(f: &Fraction, mode: ModeSortie, max_decimales: usize) -> String {
    // dénominateur nul : valeur indéfinie, quel que soit le mode
    if f.den.is_zero() {
        return "NaN".to_string();
    }
    match mode {
        ModeSortie::Fraction => {
            if f.est_entiere() {
                f.num.to_string()
            } else {
                format!("{}/{}", f.num, f.den)
            }
        }
        ModeSortie::Decimal => decimal_tronque(f, max_decimales),
    }
}

fn decimal_tronque(f: &Fraction, chiffres: usize) -> String {
    let negatif = f.num.is_negative() != f.den.is_negative();
    let num = f.num.abs();
    let den = f.den.abs();

    let partie_entiere = &num / &den;
    let reste = &num % &den;

    let mut corps = partie_entiere.to_str_radix(10);

    if !reste.is_zero() && chiffres > 0 {
        let scale = pow10(chiffres as u64);
        let mut frac = ((reste * scale) / &den).to_str_radix(10);
        while frac.len() < chiffres {
            frac.insert(0, '0');
        }
        // zéros de queue : "0.250" -> "0.25", "0.000" -> rien
        let garde = frac.trim_end_matches('0');
        if !garde.is_empty() {
            corps.push('.');
            corps.push_str(garde);
        }
    }

    if negatif && corps != "0" {
        corps.insert(0, '-');
    }
    corps
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn frac(num: i64, den: i64) -> Fraction {
        Fraction {
            num: BigInt::from(num),
            den: BigInt::from(den),
        }
    }

    #[test]
    fn decimal_simple() {
        assert_eq!(formater(&frac(3, 10), ModeSortie::Decimal, 30), "0.3");
        assert_eq!(formater(&frac(1, 2), ModeSortie::Decimal, 30), "0.5");
        assert_eq!(formater(&frac(42, 1), ModeSortie::Decimal, 30), "42");
        assert_eq!(formater(&frac(-1, 2), ModeSortie::Decimal, 30), "-0.5");
        assert_eq!(formater(&frac(0, 1), ModeSortie::Decimal, 30), "0");
    }

    #[test]
    fn troncature() {
        assert_eq!(formater(&frac(1, 3), ModeSortie::Decimal, 5), "0.33333");
        assert_eq!(formater(&frac(2, 3), ModeSortie::Decimal, 5), "0.66666");
        assert_eq!(formater(&frac(1, 3), ModeSortie::Decimal, 0), "0");
    }

    #[test]
    fn zeros_de_queue() {
        assert_eq!(formater(&frac(1, 4), ModeSortie::Decimal, 30), "0.25");
        assert_eq!(formater(&frac(1, 8), ModeSortie::Decimal, 2), "0.12");
    }

    #[test]
    fn jamais_moins_zero() {
        // -1/10000 tronqué à 2 décimales : la partie décimale disparaît
        assert_eq!(formater(&frac(-1, 10_000), ModeSortie::Decimal, 2), "0");
    }

    #[test]
    fn denominateur_nul() {
        assert_eq!(formater(&frac(1, 0), ModeSortie::Decimal, 30), "NaN");
        assert_eq!(formater(&frac(1, 0), ModeSortie::Fraction, 30), "NaN");
    }

    #[test]
    fn mode_fraction() {
        assert_eq!(formater(&frac(1, 3), ModeSortie::Fraction, 30), "1/3");
        assert_eq!(formater(&frac(-5, 1), ModeSortie::Fraction, 30), "-5");
        assert_eq!(formater(&frac(0, 1), ModeSortie::Fraction, 30), "0");
    }
}
