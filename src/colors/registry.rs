//! Theme catalogue with built-in and custom partitions

use super::builtin::builtin_records;
use super::{ColorError, CustomThemeInput, Partition, ThemeRecord};
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// One immutable generation of the catalogue
#[derive(Debug, Default)]
struct Catalogue {
    builtin: IndexMap<String, ThemeRecord>,
    custom: IndexMap<String, ThemeRecord>,
}

impl Catalogue {
    fn build(custom_inputs: &[CustomThemeInput]) -> (Self, Vec<ColorError>) {
        let builtin: IndexMap<String, ThemeRecord> = builtin_records().into_iter().collect();

        let mut custom = IndexMap::new();
        let mut skipped = Vec::new();
        for input in custom_inputs {
            match input.to_record() {
                Ok(record) => {
                    // A repeated name keeps its first position but takes the later colors.
                    custom.insert(input.name.clone(), record);
                }
                Err(e) => {
                    warn!("Skipping custom color '{}': {}", input.name, e);
                    skipped.push(e);
                }
            }
        }

        (Self { builtin, custom }, skipped)
    }

    fn names(&self, partition: Partition) -> impl Iterator<Item = &str> + '_ {
        let custom = matches!(partition, Partition::Custom | Partition::All)
            .then(|| self.custom.keys())
            .into_iter()
            .flatten();

        let builtin = matches!(partition, Partition::BuiltIn | Partition::All)
            .then(|| self.builtin.keys())
            .into_iter()
            .flatten();

        custom.chain(builtin).map(String::as_str)
    }
}

/// Owns every [`ThemeRecord`], keyed by theme name
///
/// Lookups read from a snapshot; [`ColorRegistry::reload`] builds a complete
/// new catalogue and swaps it in, so readers see either the old or the new
/// contents and never a mix.
pub struct ColorRegistry {
    snapshot: ArcSwap<Catalogue>,
}

impl ColorRegistry {
    /// Registry holding the built-in themes and no custom ones
    pub fn new() -> Self {
        Self::with_custom(&[]).0
    }

    /// Registry with no themes at all
    pub fn empty() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Catalogue::default()),
        }
    }

    /// Build a registry and report the custom entries that were skipped
    pub fn with_custom(custom: &[CustomThemeInput]) -> (Self, Vec<ColorError>) {
        let (catalogue, skipped) = Catalogue::build(custom);
        let registry = Self {
            snapshot: ArcSwap::from_pointee(catalogue),
        };
        (registry, skipped)
    }

    /// Replace both partitions.
    ///
    /// Invalid custom entries are skipped and returned; the rest are loaded.
    pub fn reload(&self, custom: &[CustomThemeInput]) -> Vec<ColorError> {
        let (catalogue, skipped) = Catalogue::build(custom);
        debug!(
            "Loaded {} built-in and {} custom colors ({} skipped)",
            catalogue.builtin.len(),
            catalogue.custom.len(),
            skipped.len()
        );
        self.snapshot.store(Arc::new(catalogue));
        skipped
    }

    /// Theme names of a partition.
    ///
    /// For [`Partition::All`] custom names come first, in configuration
    /// order, followed by every built-in name in table order. A built-in
    /// name shadowed by a custom theme is still listed.
    pub fn names(&self, partition: Partition) -> ThemeNames {
        ThemeNames {
            catalogue: self.snapshot.load_full(),
            partition,
        }
    }

    /// Look a theme up by name, custom themes first
    pub fn resolve(&self, name: &str) -> Result<ThemeRecord, ColorError> {
        let catalogue = self.snapshot.load();
        catalogue
            .custom
            .get(name)
            .or_else(|| catalogue.builtin.get(name))
            .cloned()
            .ok_or_else(|| ColorError::NotFound(name.to_string()))
    }

    pub fn has_custom(&self) -> bool {
        !self.snapshot.load().custom.is_empty()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Restartable view over the theme names of one catalogue generation
pub struct ThemeNames {
    catalogue: Arc<Catalogue>,
    partition: Partition,
}

impl ThemeNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.catalogue.names(self.partition)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Another partition of the same catalogue generation
    pub fn within(&self, partition: Partition) -> ThemeNames {
        ThemeNames {
            catalogue: Arc::clone(&self.catalogue),
            partition,
        }
    }
}
