//! Score de itens e cálculo do ranking.
//!
//! - [`Scorer`] mapeia um item para um número; [`LinearScorer`] é a soma
//!   ponderada usada pelo feed.
//! - [`Ranker`] pontua o catálogo inteiro e ordena do maior para o menor,
//!   mantendo a ordem do catálogo nos empates.

mod ranker;
mod scorer;

pub use ranker::{RankedResult, Ranker};
pub use scorer::{LinearScorer, Scorer};
