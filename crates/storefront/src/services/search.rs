use super::types::*;
use anyhow::{Context, Result};
use std::path::Path;

/// Case-insensitive substring match across title, description, price and tags.
///
/// An empty query matches everything.
pub fn matches(query: &SearchQuery, item: &SearchableItem) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.as_str();
    let tags = item
        .tags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .price
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(needle))
        || tags.to_lowercase().contains(needle)
}

/// Compute the visible subset of `items` for `query`.
///
/// Pure: the same arguments always give the same outcome. Visible ids keep
/// the catalog order.
pub fn filter(query: &SearchQuery, items: &[SearchableItem]) -> FilterOutcome {
    let visible_ids: Vec<String> = items
        .iter()
        .filter(|item| matches(query, item))
        .map(|item| item.id.clone())
        .collect();
    let match_count = visible_ids.len();

    let signal = if match_count == 0 && !query.is_empty() {
        EmptyStateSignal::Show {
            query: query.as_str().to_string(),
        }
    } else {
        EmptyStateSignal::Clear
    };

    FilterOutcome {
        visible_ids,
        match_count,
        signal,
    }
}

/// What applying a signal did to the indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorChange {
    Created,
    Updated,
    Removed,
    Unchanged,
}

/// The single "no results" indicator of a results container.
///
/// At most one indicator exists; repeated `Show` signals update it in place.
#[derive(Debug, Clone, Default)]
pub struct EmptyState {
    query: Option<String>,
}

impl EmptyState {
    pub fn apply(&mut self, signal: &EmptyStateSignal) -> IndicatorChange {
        match signal {
            EmptyStateSignal::Show { query } => {
                if self.query.as_deref() == Some(query.as_str()) {
                    return IndicatorChange::Unchanged;
                }
                let existed = self.query.replace(query.clone()).is_some();
                if existed {
                    IndicatorChange::Updated
                } else {
                    IndicatorChange::Created
                }
            }
            EmptyStateSignal::Clear => match self.query.take() {
                Some(_) => IndicatorChange::Removed,
                None => IndicatorChange::Unchanged,
            },
        }
    }

    pub fn is_shown(&self) -> bool {
        self.query.is_some()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Text rendered inside the indicator
    pub fn message(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(|q| format!("No products matching \"{}\" were found.", q))
    }
}

/// Ordered list of searchable cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<SearchableItem>,
}

impl Catalog {
    pub fn new(items: Vec<SearchableItem>) -> Self {
        Self { items }
    }

    /// One card per configured product, tagged with its category
    pub fn from_products(products: &ProductCatalog) -> Self {
        let items = products
            .categories()
            .into_iter()
            .flat_map(|(category, names)| {
                names.iter().map(move |name| {
                    SearchableItem::new(slug::slugify(name), name.clone(), category.to_string())
                        .with_tags([category])
                })
            })
            .collect();
        Self { items }
    }

    /// Load a catalog from a JSON or YAML file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let items: Vec<SearchableItem> = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content).context("Failed to parse JSON catalog")?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).context("Failed to parse YAML catalog")?
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported catalog format: {} (expected .json, .yaml or .yml)",
                    path.display()
                ))
            }
        };

        Ok(Self { items })
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Service for filtering a catalog and tracking its empty-state indicator
pub struct SearchService {
    catalog: Catalog,
    indicator: EmptyState,
}

impl SearchService {
    /// Create a new search service
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            indicator: EmptyState::default(),
        }
    }

    /// Filter the catalog and reconcile the indicator with the outcome
    pub fn search(&mut self, raw_query: &str) -> FilterOutcome {
        let query = SearchQuery::new(raw_query);
        let outcome = filter(&query, self.catalog.items());
        let change = self.indicator.apply(&outcome.signal);

        tracing::debug!(
            query = %query,
            matches = outcome.match_count,
            indicator = ?change,
            "filtered catalog"
        );

        outcome
    }

    /// Reset to the unfiltered view
    pub fn clear(&mut self) -> FilterOutcome {
        self.search("")
    }

    pub fn indicator(&self) -> &EmptyState {
        &self.indicator
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Visible items in catalog order
    pub fn visible<'a>(&'a self, outcome: &FilterOutcome) -> Vec<&'a SearchableItem> {
        self.catalog
            .items()
            .iter()
            .filter(|item| outcome.is_visible(&item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn drinks() -> Vec<SearchableItem> {
        vec![
            SearchableItem::new("latte", "Signature Latte", "Double shot with steamed milk")
                .with_price("R45"),
            SearchableItem::new("cold-brew", "Cold Brew", "Steeped for eighteen hours")
                .with_price("R50")
                .with_tags(["iced", "coffee"]),
            SearchableItem::new("mug", "Artisan Ceramic Mug", "Hand thrown in Cape Town"),
        ]
    }

    mod filtering {
        use super::*;

        #[test]
        fn empty_query_shows_everything() {
            let items = drinks();
            let outcome = filter(&SearchQuery::new(""), &items);
            assert_eq!(outcome.match_count, items.len());
            assert_eq!(outcome.visible_ids, vec!["latte", "cold-brew", "mug"]);
            assert_eq!(outcome.signal, EmptyStateSignal::Clear);
        }

        #[test]
        fn empty_query_ignores_order() {
            let mut items = drinks();
            items.reverse();
            let outcome = filter(&SearchQuery::new("  "), &items);
            assert_eq!(outcome.match_count, 3);
        }

        #[test]
        fn title_match_is_case_insensitive() {
            let items = vec![
                SearchableItem::new("1", "Signature Latte", ""),
                SearchableItem::new("2", "Cold Brew", ""),
            ];
            let outcome = filter(&SearchQuery::new("LATTE"), &items);
            assert_eq!(outcome.visible_ids, vec!["1"]);
            assert_eq!(outcome.match_count, 1);
        }

        #[test]
        fn matches_description_price_and_tags() {
            let items = drinks();
            assert_eq!(filter(&"eighteen".into(), &items).visible_ids, vec!["cold-brew"]);
            assert_eq!(filter(&"r45".into(), &items).visible_ids, vec!["latte"]);
            assert_eq!(filter(&"iced".into(), &items).visible_ids, vec!["cold-brew"]);
        }

        #[test]
        fn visible_ids_keep_catalog_order() {
            let items = drinks();
            let outcome = filter(&SearchQuery::new("e"), &items);
            assert_eq!(outcome.visible_ids, vec!["latte", "cold-brew", "mug"]);
        }

        #[test]
        fn no_match_signals_show_with_query() {
            let outcome = filter(&SearchQuery::new(" XYZ123 "), &drinks());
            assert_eq!(outcome.match_count, 0);
            assert_eq!(
                outcome.signal,
                EmptyStateSignal::Show {
                    query: "xyz123".to_string()
                }
            );
        }

        #[test]
        fn filter_is_idempotent() {
            let items = drinks();
            let query = SearchQuery::new("brew");
            assert_eq!(filter(&query, &items), filter(&query, &items));
        }
    }

    mod indicator {
        use super::*;

        #[test]
        fn show_then_clear() {
            let mut state = EmptyState::default();
            let show = EmptyStateSignal::Show {
                query: "xyz".to_string(),
            };
            assert_eq!(state.apply(&show), IndicatorChange::Created);
            assert_eq!(
                state.message().as_deref(),
                Some("No products matching \"xyz\" were found.")
            );
            assert_eq!(state.apply(&EmptyStateSignal::Clear), IndicatorChange::Removed);
            assert!(!state.is_shown());
        }

        #[test]
        fn repeated_show_does_not_accumulate() {
            let mut state = EmptyState::default();
            let show = EmptyStateSignal::Show {
                query: "xyz".to_string(),
            };
            state.apply(&show);
            assert_eq!(state.apply(&show), IndicatorChange::Unchanged);
            assert_eq!(state.query(), Some("xyz"));
        }

        #[test]
        fn new_query_updates_in_place() {
            let mut state = EmptyState::default();
            state.apply(&EmptyStateSignal::Show {
                query: "xyz".to_string(),
            });
            let change = state.apply(&EmptyStateSignal::Show {
                query: "abc".to_string(),
            });
            assert_eq!(change, IndicatorChange::Updated);
            assert_eq!(state.query(), Some("abc"));
        }

        #[test]
        fn clear_without_indicator_is_noop() {
            let mut state = EmptyState::default();
            assert_eq!(state.apply(&EmptyStateSignal::Clear), IndicatorChange::Unchanged);
        }
    }

    mod service {
        use super::*;

        #[test]
        fn empty_result_then_reset() {
            let mut service = SearchService::new(Catalog::new(drinks()));

            let outcome = service.search("xyz123");
            assert_eq!(outcome.match_count, 0);
            assert!(service.indicator().is_shown());

            service.search("xyz123");
            assert_eq!(service.indicator().query(), Some("xyz123"));

            let outcome = service.clear();
            assert_eq!(outcome.match_count, 3);
            assert!(!service.indicator().is_shown());
        }

        #[test]
        fn visible_returns_items_in_order() {
            let mut service = SearchService::new(Catalog::new(drinks()));
            let outcome = service.search("r");
            let titles: Vec<_> = service
                .visible(&outcome)
                .iter()
                .map(|i| i.title.as_str())
                .collect();
            assert_eq!(
                titles,
                vec!["Signature Latte", "Cold Brew", "Artisan Ceramic Mug"]
            );
        }
    }

    mod catalog {
        use super::*;

        #[test]
        fn from_products_slugifies_and_tags() {
            let catalog = Catalog::from_products(&ProductCatalog::default());
            assert_eq!(catalog.len(), 12);
            let first = &catalog.items()[0];
            assert_eq!(first.id, "signature-latte");
            assert!(first.tags.contains("coffee"));
        }

        #[test]
        fn product_catalog_is_searchable_by_category() {
            let catalog = Catalog::from_products(&ProductCatalog::default());
            let outcome = filter(&"sculptures".into(), catalog.items());
            assert_eq!(outcome.match_count, 3);
        }

        #[test]
        fn loads_json() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = dir.path().join("catalog.json");
            std::fs::write(
                &path,
                r#"[{"id":"a","title":"Cold Brew Tonic","description":"Fizzy","price":"R55"}]"#,
            )
            .unwrap();

            let catalog = Catalog::load(&path).unwrap();
            assert_eq!(catalog.len(), 1);
            assert_eq!(catalog.items()[0].price.as_deref(), Some("R55"));
        }

        #[test]
        fn loads_yaml() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = dir.path().join("catalog.yaml");
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(
                file,
                "- id: steel\n  title: Steel Abstract\n  description: Welded form\n  tags: [sculpture, outdoor]"
            )
            .unwrap();

            let catalog = Catalog::load(&path).unwrap();
            assert_eq!(catalog.items()[0].tags.len(), 2);
        }

        #[test]
        fn rejects_unknown_extension() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = dir.path().join("catalog.csv");
            std::fs::write(&path, "id,title").unwrap();
            let err = Catalog::load(&path).unwrap_err();
            assert!(err.to_string().contains("Unsupported catalog format"));
        }
    }
}
