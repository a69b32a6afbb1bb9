//! Tests de propriétés : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence indépendante : BigRational (canonique) recalcule chaque
//!   expression générée; le moteur doit tomber sur la même valeur exacte
//! - invariant clé : le résultat est toujours canonique (pgcd = 1, den > 0)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::calcul::{evaluer_texte, Options};
use super::erreurs::ErreurCalcul;
use super::evaluer_expression;
use super::fraction::pgcd;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Un atome : petit entier ou petite fraction, avec sa valeur de référence.
fn gen_atome(rng: &mut Rng) -> (String, BigRational) {
    let a = rng.pick(10) as i64;
    if rng.coin() {
        let b = 1 + rng.pick(8) as i64;
        (format!("{a}/{b}"), rat(a, b))
    } else {
        (format!("{a}"), rat(a, 1))
    }
}

/// Expression parenthésée + valeur de référence. `None` = division par
/// zéro attendue quelque part dans le sous-arbre.
fn gen_expr(rng: &mut Rng, profondeur: usize) -> (String, Option<BigRational>) {
    if profondeur == 0 {
        let (s, v) = gen_atome(rng);
        return (s, Some(v));
    }

    match rng.pick(7) {
        0 => {
            let (s, v) = gen_atome(rng);
            (s, Some(v))
        }
        1 => {
            let (a, va) = gen_expr(rng, profondeur - 1);
            let (b, vb) = gen_expr(rng, profondeur - 1);
            (format!("({a}+{b})"), va.zip(vb).map(|(x, y)| x + y))
        }
        2 => {
            let (a, va) = gen_expr(rng, profondeur - 1);
            let (b, vb) = gen_expr(rng, profondeur - 1);
            (format!("({a}-{b})"), va.zip(vb).map(|(x, y)| x - y))
        }
        3 => {
            let (a, va) = gen_expr(rng, profondeur - 1);
            let (b, vb) = gen_expr(rng, profondeur - 1);
            (format!("({a}*{b})"), va.zip(vb).map(|(x, y)| x * y))
        }
        4 => {
            let (a, va) = gen_expr(rng, profondeur - 1);
            let (b, vb) = gen_expr(rng, profondeur - 1);
            let v = match (va, vb) {
                (Some(x), Some(y)) if !y.is_zero() => Some(x / y),
                _ => None,
            };
            (format!("({a}/{b})"), v)
        }
        5 => {
            let (a, va) = gen_expr(rng, profondeur - 1);
            (format!("(-{a})"), va.map(|x| -x))
        }
        _ => {
            // petite puissance entière, référence par produit répété
            let (a, va) = gen_expr(rng, profondeur - 1);
            let e = rng.pick(4);
            let v = va.map(|x| {
                let mut acc = BigRational::one();
                for _ in 0..e {
                    acc *= &x;
                }
                acc
            });
            (format!("({a})^{e}"), v)
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn croise_avec_la_reference_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let options = Options::default();

    let mut vus_ok = 0usize;
    let mut vus_div_zero = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, reference) = gen_expr(&mut rng, 5);
        match (evaluer_texte(&expr, &options), reference) {
            (Ok(f), Some(r)) => {
                assert_eq!(&f.num, r.numer(), "num: expr={expr:?}");
                assert_eq!(&f.den, r.denom(), "den: expr={expr:?}");
                vus_ok += 1;
            }
            (Err(ErreurCalcul::DivisionParZero { .. }), None) => {
                vus_div_zero += 1;
            }
            (resultat, reference) => {
                panic!("divergence: expr={expr:?} moteur={resultat:?} ref={reference:?}");
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne balaye rien.
    assert!(vus_ok > 50, "trop peu de succès: {vus_ok}");
    assert!(vus_div_zero > 0, "aucune division par zéro vue");
}

#[test]
fn resultat_toujours_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let options = Options::default();

    for _ in 0..200 {
        budget(t0, max);

        let (expr, _) = gen_expr(&mut rng, 4);
        let Ok(f) = evaluer_texte(&expr, &options) else {
            continue;
        };
        assert!(f.den.is_positive(), "den <= 0: expr={expr:?}");
        assert!(
            f.num.is_zero() || pgcd(&f.num, &f.den).is_one(),
            "non réduit: expr={expr:?} -> {}/{}",
            f.num,
            f.den
        );
        if f.num.is_zero() {
            assert!(f.den.is_one(), "zéro non normalisé: expr={expr:?}");
        }
    }
}

#[test]
fn determinisme_meme_graine_meme_sortie() {
    let options = Options::default();

    let mut premiere = Vec::new();
    for passe in 0..2 {
        let mut rng = Rng::new(0xFEED_u64);
        let mut sorties = Vec::new();
        for _ in 0..60 {
            let (expr, _) = gen_expr(&mut rng, 4);
            sorties.push(format!("{:?}", evaluer_texte(&expr, &options)));
        }
        if passe == 0 {
            premiere = sorties;
        } else {
            assert_eq!(sorties, premiere);
        }
    }
}

#[test]
fn imbrication_un_million_de_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_secs(30);

    let n = 1_000_000usize;
    let mut s = String::with_capacity(2 * n + 1);
    for _ in 0..n {
        s.push('(');
    }
    s.push('0');
    for _ in 0..n {
        s.push(')');
    }

    let sortie = evaluer_expression(&s, &Options::default())
        .unwrap_or_else(|e| panic!("imbrication: {e}"));
    assert_eq!(sortie, "0");
    budget(t0, max);
}

#[test]
fn chaine_plate_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(30);

    // 100 000 termes sans aucune parenthèse
    let n = 100_000usize;
    let mut s = String::with_capacity(2 * n);
    s.push('1');
    for _ in 1..n {
        s.push_str("+1");
    }

    let sortie = evaluer_expression(&s, &Options::default())
        .unwrap_or_else(|e| panic!("chaîne plate: {e}"));
    assert_eq!(sortie, n.to_string());
    budget(t0, max);
}

#[test]
fn factorielle_grande_contre_reference() {
    // 1200! par le moteur == produit naïf par la référence
    let sortie = evaluer_expression("1200!", &Options::default())
        .unwrap_or_else(|e| panic!("1200!: {e}"));

    let mut reference = BigInt::one();
    for k in 2..=1200u32 {
        reference *= k;
    }
    assert_eq!(sortie, reference.to_string());
}
