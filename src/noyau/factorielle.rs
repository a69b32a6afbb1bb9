// src/noyau/factorielle.rs
//
// Factorielle exacte. Petits n : produit direct. Grands n : décomposition
// en facteurs premiers (crible + formule de Legendre) puis produit
// équilibré, ce qui évite de multiplier un géant par de petits facteurs
// à répétition.

use num_bigint::BigInt;
use num_traits::{One, Pow};

/// En deçà, le produit direct est plus rapide que la décomposition.
const SEUIL_PRODUIT_DIRECT: u64 = 1000;

pub fn factorielle(n: u64) -> BigInt {
    if n < SEUIL_PRODUIT_DIRECT {
        return produit_direct(n);
    }

    let premiers = crible(n as usize);
    let facteurs: Vec<BigInt> = premiers
        .into_iter()
        .map(|p| {
            // exposant de p dans n! (formule de Legendre)
            let mut exposant: u64 = 0;
            let mut c = n;
            while c >= p {
                c /= p;
                exposant += c;
            }
            Pow::pow(&BigInt::from(p), exposant)
        })
        .collect();
    produit_equilibre(&facteurs)
}

fn produit_direct(n: u64) -> BigInt {
    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    acc
}

/// Nombres premiers <= limite (crible d'Ératosthène).
fn crible(limite: usize) -> Vec<u64> {
    let mut compose = vec![false; limite + 1];
    let mut premiers = Vec::new();
    for p in 2..=limite {
        if compose[p] {
            continue;
        }
        premiers.push(p as u64);
        let mut m = p * p;
        while m <= limite {
            compose[m] = true;
            m += p;
        }
    }
    premiers
}

/// Produit par scission équilibrée : les deux moitiés restent de tailles
/// comparables, donc les multiplications portent sur des opérandes
/// comparables.
fn produit_equilibre(facteurs: &[BigInt]) -> BigInt {
    match facteurs.len() {
        0 => BigInt::one(),
        1 => facteurs[0].clone(),
        n => {
            let (gauche, droite) = facteurs.split_at(n / 2);
            produit_equilibre(gauche) * produit_equilibre(droite)
        }
    }
}
