//! # feedrank
//!
//! Endpoint de feed ranqueado. Dado um id de usuário, retorna o catálogo
//! ordenado por um score ponderado, memorizando o ranking de cada usuário num
//! cache LRU limitado.
//!
//! ## Módulos
//!
//! - [`catalog`] - Catálogo de conteúdo em memória, carregado na inicialização
//! - [`scoring`] - Trait de score, score linear e o cálculo do ranking
//! - [`cache`] - Cache LRU de rankings por usuário, com misses coalescidos
//! - [`service`] - Montagem do feed sobre cache, ranker e catálogo
//! - [`server`] - Rotas HTTP com axum (`/feed`, `/health`)
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Configuração, erros, tipos de request e response

pub mod cache;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod scoring;
pub mod server;
pub mod service;
pub mod types;

pub use types::config::Config;
pub use types::errors::{FeedError, FeedResult};
