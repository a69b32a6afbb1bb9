// src/main.rs

use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;

use calcul_exact::{evaluer_expression, ModeSortie, Options};

#[derive(Parser)]
#[command(name = "calcul-exact")]
#[command(about = "Évaluateur arithmétique exact (rationnels à précision arbitraire)")]
#[command(version)]
struct Cli {
    /// L'expression à évaluer (lue sur stdin si absente)
    expression: Option<String>,

    /// Sortie en fraction num/den au lieu du décimal tronqué
    #[arg(short, long)]
    fraction: bool,

    /// Décimales conservées en mode décimal (troncature)
    #[arg(short, long, default_value_t = 30)]
    decimales: usize,

    /// Lit la virgule comme séparateur décimal
    #[arg(short, long)]
    virgule: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let texte = match cli.expression {
        Some(e) => e,
        None => {
            let mut tampon = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut tampon) {
                eprintln!("erreur: lecture de stdin: {e}");
                return ExitCode::FAILURE;
            }
            tampon
        }
    };
    let texte = texte.trim();

    let options = Options {
        separateur_decimal: if cli.virgule { ',' } else { '.' },
        mode: if cli.fraction {
            ModeSortie::Fraction
        } else {
            ModeSortie::Decimal
        },
        max_decimales: cli.decimales,
    };

    match evaluer_expression(texte, &options) {
        Ok(sortie) => {
            println!("{sortie}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("erreur: {e}");
            // caret sous le caractère fautif
            if let Some(pos) = e.position() {
                eprintln!("  {texte}");
                let marge: String = texte
                    .chars()
                    .take(pos)
                    .map(|c| if c.is_whitespace() { c } else { ' ' })
                    .collect();
                eprintln!("  {marge}^");
            }
            ExitCode::FAILURE
        }
    }
}
