// src/noyau/fraction.rs
//
// Rationnel exact num/den sur BigInt. Contrairement à un rationnel
// canonique, la forme intermédiaire N'EST PAS réduite à chaque opération :
// la réduction complète (pgcd) ne se déclenche que si le dénominateur
// dépasse le seuil de croissance. Le résultat final d'une évaluation passe
// par `canonique()`.
//
// Politiques de croissance :
// - addition / soustraction : dénominateur commun = ppcm (pas le produit)
// - multiplication / division : annulation croisée avant le produit
// - `bornee` : réduction complète seulement au-delà du seuil

use std::ops::{Add, Mul, Sub};
use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Pow, Signed, Zero};

/// Nombre de chiffres décimaux du dénominateur au-delà duquel la forme
/// intermédiaire est entièrement réduite.
const SEUIL_CHIFFRES_DEN: u32 = 4000;

fn seuil_simplification() -> &'static BigUint {
    static SEUIL: OnceLock<BigUint> = OnceLock::new();
    SEUIL.get_or_init(|| BigUint::from(10u32).pow(SEUIL_CHIFFRES_DEN))
}

/// 10^n sous forme de BigInt.
pub fn pow10(n: u64) -> BigInt {
    BigInt::from(10u32).pow(n)
}

/// Pgcd binaire (Stein) sur les magnitudes. pgcd(0, b) = b.
pub fn pgcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.magnitude().clone();
    let mut b = b.magnitude().clone();
    if a.is_zero() {
        return BigInt::from(b);
    }
    if b.is_zero() {
        return BigInt::from(a);
    }

    let za = a.trailing_zeros().unwrap_or(0);
    let zb = b.trailing_zeros().unwrap_or(0);
    let commun = za.min(zb);
    a >>= za;
    b >>= zb;

    // a et b impairs à chaque tour
    loop {
        if a.is_one() || b.is_one() {
            return BigInt::from(BigUint::one() << commun);
        }
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b -= &a;
        if b.is_zero() {
            return BigInt::from(a << commun);
        }
        b >>= b.trailing_zeros().unwrap_or(0);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fraction {
    pub num: BigInt,
    pub den: BigInt,
}

impl Fraction {
    pub fn zero() -> Self {
        Fraction {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }

    pub fn entiere(n: BigInt) -> Self {
        Fraction {
            num: n,
            den: BigInt::one(),
        }
    }

    pub fn est_entiere(&self) -> bool {
        self.den.is_one()
    }

    /// Forme canonique : signe porté par le numérateur, pgcd(num, den) = 1,
    /// zéro représenté 0/1.
    pub fn simplifiee(mut num: BigInt, mut den: BigInt) -> Self {
        if num.is_zero() {
            return Fraction::zero();
        }
        if den.is_negative() {
            num = -num;
            den = -den;
        }
        let g = pgcd(&num, &den);
        if !g.is_one() {
            num /= &g;
            den /= &g;
        }
        Fraction { num, den }
    }

    pub fn canonique(&self) -> Self {
        Fraction::simplifiee(self.num.clone(), self.den.clone())
    }

    /// Construction avec politique de croissance : on ne réduit entièrement
    /// que si le dénominateur dépasse le seuil.
    fn bornee(num: BigInt, den: BigInt) -> Self {
        if den.is_one() {
            return Fraction {
                num,
                den: BigInt::one(),
            };
        }
        if den.magnitude() > seuil_simplification() {
            return Fraction::simplifiee(num, den);
        }
        Fraction { num, den }
    }

    fn combiner(&self, autre: &Fraction, soustraire: bool) -> Fraction {
        // dénominateurs égaux : addition directe
        if self.den == autre.den {
            let num = if soustraire {
                &self.num - &autre.num
            } else {
                &self.num + &autre.num
            };
            return Fraction::bornee(num, self.den.clone());
        }

        let g = pgcd(&self.den, &autre.den);
        if g.is_one() {
            let gauche = &self.num * &autre.den;
            let droite = &autre.num * &self.den;
            let num = if soustraire {
                gauche - droite
            } else {
                gauche + droite
            };
            return Fraction::bornee(num, &self.den * &autre.den);
        }

        // dénominateur commun = ppcm, pas le produit
        let fg = &autre.den / &g;
        let fd = &self.den / &g;
        let gauche = &self.num * &fg;
        let droite = &autre.num * &fd;
        let num = if soustraire {
            gauche - droite
        } else {
            gauche + droite
        };
        Fraction::bornee(num, &self.den * fg)
    }

    pub fn plus(&self, autre: &Fraction) -> Fraction {
        self.combiner(autre, false)
    }

    pub fn moins(&self, autre: &Fraction) -> Fraction {
        self.combiner(autre, true)
    }

    pub fn fois(&self, autre: &Fraction) -> Fraction {
        // produit d'entiers : rien à annuler
        if self.den.is_one() && autre.den.is_one() {
            return Fraction::entiere(&self.num * &autre.num);
        }

        // annulation croisée avant le produit
        let g1 = pgcd(&self.num, &autre.den);
        let g2 = pgcd(&autre.num, &self.den);

        let num = (&self.num / &g1) * (&autre.num / &g2);
        let den = (&self.den / &g2) * (&autre.den / &g1);
        Fraction::bornee(num, den)
    }

    /// Division par l'inverse. L'appelant garantit que `autre.num` est
    /// non nul.
    pub fn diviser(&self, autre: &Fraction) -> Fraction {
        let inverse = Fraction {
            num: autre.den.clone(),
            den: autre.num.clone(),
        };
        self.fois(&inverse)
    }

    pub fn inverse(&self) -> Fraction {
        Fraction {
            num: self.den.clone(),
            den: self.num.clone(),
        }
    }

    pub fn negatif(&self) -> Fraction {
        Fraction {
            num: -&self.num,
            den: self.den.clone(),
        }
    }

    pub fn valeur_absolue(&self) -> Fraction {
        Fraction {
            num: self.num.abs(),
            den: self.den.abs(),
        }
    }

    /// Élévation à un exposant entier positif ou nul. Pour un exposant
    /// négatif, l'appelant inverse la base d'abord.
    pub fn puissance_entiere(&self, exposant: u64) -> Fraction {
        if exposant == 0 {
            return Fraction::entiere(BigInt::one());
        }
        Fraction::bornee(
            Pow::pow(&self.num, exposant),
            Pow::pow(&self.den, exposant),
        )
    }
}

impl Add for &Fraction {
    type Output = Fraction;
    fn add(self, autre: &Fraction) -> Fraction {
        self.plus(autre)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;
    fn sub(self, autre: &Fraction) -> Fraction {
        self.moins(autre)
    }
}

impl Mul for &Fraction {
    type Output = Fraction;
    fn mul(self, autre: &Fraction) -> Fraction {
        self.fois(autre)
    }
}
