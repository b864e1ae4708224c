//! Catálogo de conteúdo em memória.
//!
//! Carregado uma vez na inicialização e somente leitura depois disso. Mantém
//! os itens na ordem de carga (empates no ranking seguem essa ordem) e um
//! índice por id para converter uma sequência ranqueada de volta em itens.

mod index;
mod item;

pub use index::Catalog;
pub use item::{ContentItem, ItemId};
