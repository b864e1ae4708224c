//! Catálogo ordenado com índice por id.

use std::collections::HashMap;
use std::path::Path;

use crate::types::config::CatalogConfig;
use crate::{FeedError, FeedResult};

use super::item::{ContentItem, ItemId};

/// Conjunto ordenado e somente leitura de itens de conteúdo.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ContentItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Cria o catálogo, validando cada item e rejeitando ids duplicados.
    pub fn new(items: Vec<ContentItem>) -> FeedResult<Self> {
        let mut index = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            item.validate()?;
            if index.insert(item.id, position).is_some() {
                return Err(FeedError::DuplicateItem(item.id));
            }
        }

        Ok(Self { items, index })
    }

    /// Catálogo de três posts que acompanha o serviço.
    pub fn demo() -> FeedResult<Self> {
        Self::new(vec![
            ContentItem::new(1, 0.9, 0.8, 0.6, "Hello from Meta-like feed!"),
            ContentItem::new(2, 0.5, 0.6, 0.9, "Photos from your friends"),
            ContentItem::new(3, 0.7, 0.9, 0.7, "Trending story"),
        ])
    }

    /// Parseia um array JSON de itens.
    pub fn from_json_str(json: &str) -> FeedResult<Self> {
        let items: Vec<ContentItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Lê um array JSON de itens do disco.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Carrega o catálogo indicado na configuração, ou o catálogo demo.
    pub fn load(config: &CatalogConfig) -> FeedResult<Self> {
        match &config.path {
            Some(path) => {
                let catalog = Self::from_json_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    items = catalog.len(),
                    "Catalog loaded from file"
                );
                Ok(catalog)
            }
            None => {
                tracing::info!("No catalog path configured, using built-in demo catalog");
                Self::demo()
            }
        }
    }

    /// Itens na ordem do catálogo.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Busca um item pelo id.
    pub fn get(&self, id: ItemId) -> Option<&ContentItem> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    /// Converte uma sequência ranqueada de ids em itens, mantendo a ordem.
    ///
    /// O catálogo não muda depois da inicialização: um id ausente indica que
    /// ranking e catálogo divergiram. Isso vira
    /// [`FeedError::CatalogInconsistency`] e dispara assert em builds de debug.
    pub fn resolve(&self, ids: &[ItemId]) -> FeedResult<Vec<ContentItem>> {
        ids.iter()
            .map(|&id| match self.get(id) {
                Some(item) => Ok(item.clone()),
                None => {
                    tracing::error!(item_id = id, "Ranked item missing from catalog");
                    debug_assert!(false, "ranked item {} missing from catalog", id);
                    Err(FeedError::CatalogInconsistency(id))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo().unwrap();

        assert_eq!(catalog.len(), 3);
        let ids: Vec<ItemId> = catalog.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.get(3).unwrap().text, "Trending story");
    }

    #[test]
    fn test_demo_catalog_passes_validation() {
        let demo = Catalog::demo().unwrap();

        for item in demo.items() {
            item.validate().unwrap();
            assert_eq!(demo.get(item.id), Some(item));
        }
        let rebuilt = Catalog::new(demo.items().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), demo.len());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![
            ContentItem::new(1, 0.1, 0.1, 0.1, "a"),
            ContentItem::new(1, 0.2, 0.2, 0.2, "b"),
        ])
        .unwrap_err();

        assert!(matches!(err, FeedError::DuplicateItem(1)));
    }

    #[test]
    fn test_invalid_item_rejected() {
        let err = Catalog::new(vec![ContentItem::new(9, 2.0, 0.1, 0.1, "a")]).unwrap_err();
        assert!(matches!(err, FeedError::InvalidCatalog(_)));
    }

    #[test]
    fn test_resolve_preserves_order() {
        let catalog = Catalog::demo().unwrap();
        let items = catalog.resolve(&[3, 1, 2]).unwrap();

        let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing from catalog")]
    fn test_resolve_unknown_id_asserts() {
        let _ = Catalog::demo().unwrap().resolve(&[1, 42]);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 10, "freshness": 0.2, "affinity": 0.4, "engagement": 0.6, "text": "ten"}},
                {{"id": 20, "freshness": 0.3, "affinity": 0.5, "engagement": 0.7, "text": "twenty"}}
            ]"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(20).unwrap().text, "twenty");
        assert!(catalog.get(30).is_none());
    }

    #[test]
    fn test_load_without_path_uses_demo() {
        let catalog = Catalog::load(&CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
