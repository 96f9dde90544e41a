//! Categories and the directed cycle between their motion models.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;

use crate::config::{CategoryConfig, SceneConfig};
use crate::error::{ConfigError, Result};
use crate::motion::Element;
use crate::palette::{PaletteItem, load_palette};
use crate::types::{Rgba, rgba_from_u8};

/// Successor function over the five motion models.
///
/// Always a single cycle through all five tags: total, no fixed points,
/// no shorter sub-cycle. Anything else is rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleTable {
    next: [Element; 5],
}

impl Default for CycleTable {
    fn default() -> Self {
        Self::generation()
    }
}

impl CycleTable {
    /// wood → fire → earth → metal → water → wood.
    pub fn generation() -> Self {
        Self {
            next: Element::ALL.map(Element::generates),
        }
    }

    /// Builds a table from `(from, to)` tag pairs, e.g. `("wood", "fire")`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut next: [Option<Element>; 5] = [None; 5];
        for (from, to) in pairs {
            let from: Element = from.as_ref().parse()?;
            let to: Element = to.as_ref().parse()?;
            let slot = &mut next[from.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateCycleEntry(from));
            }
            *slot = Some(to);
        }

        let mut table = [Element::Wood; 5];
        for e in Element::ALL {
            table[e.index()] = next[e.index()].ok_or(ConfigError::MissingCycleEntry(e))?;
        }

        let table = Self { next: table };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for e in Element::ALL {
            if self.next_model(e) == e {
                return Err(ConfigError::CycleFixedPoint(e));
            }
        }

        // Walking from any tag must visit all five before returning.
        let start = Element::Wood;
        let mut cur = self.next_model(start);
        let mut len = 1;
        while cur != start {
            if len >= Element::ALL.len() {
                // Entered a loop that never returns to `start`.
                return Err(ConfigError::ShortCycle { start: cur, len });
            }
            cur = self.next_model(cur);
            len += 1;
        }
        if len != Element::ALL.len() {
            return Err(ConfigError::ShortCycle { start, len });
        }
        Ok(())
    }

    #[inline]
    pub fn next_model(&self, element: Element) -> Element {
        self.next[element.index()]
    }
}

/// A named category: its color, motion model and optional palette items.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub name: String,
    pub color: Rgba,
    pub element: Element,
    /// One cluster per item; empty means one cluster for the whole category.
    pub items: Vec<PaletteItem>,
    /// Fixed center, overriding placement on the direction sphere.
    pub center: Option<Vec3>,
    /// Alpha applied to item colors.
    pub alpha: f32,
}

impl Category {
    /// Resolves one configured category, loading its palette if it has one.
    ///
    /// Relative palette paths are taken relative to `base_dir`.
    pub fn from_config(cfg: &CategoryConfig, base_dir: &Path) -> Result<Self> {
        let element: Element = cfg.element.parse()?;

        let items = match &cfg.palette {
            Some(path) => {
                let items = load_palette(&cfg.name, &base_dir.join(path))?;
                if items.is_empty() {
                    log::warn!("palette for `{}` has no rows", cfg.name);
                }
                items
            }
            None => Vec::new(),
        };

        // A palette-only category takes the color of its first item.
        let rgb = cfg
            .color
            .or_else(|| items.first().map(|i| i.rgb))
            .ok_or_else(|| ConfigError::MissingColor(cfg.name.clone()))?;

        Ok(Self {
            name: cfg.name.clone(),
            color: rgba_from_u8(rgb, cfg.alpha),
            element,
            items,
            center: cfg.center.map(Vec3::from_array),
            alpha: cfg.alpha,
        })
    }

    pub fn has_palette(&self) -> bool {
        !self.items.is_empty()
    }
}

/// Every category of a scene plus the cycle linking their models.
///
/// Read-only once built.
#[derive(Clone, Debug)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    cycle: CycleTable,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>, cycle: CycleTable) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(categories.len());
        for c in &categories {
            if !seen.insert(c.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(c.name.clone()));
            }
        }
        Ok(Self { categories, cycle })
    }

    /// Resolves every category of `scene`, loading palettes from `base_dir`.
    pub fn from_scene(scene: &SceneConfig, base_dir: &Path) -> Result<Self> {
        let cycle = scene.cycle_table()?;
        let categories = scene
            .categories
            .iter()
            .map(|c| Category::from_config(c, base_dir))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(categories, cycle)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn cycle(&self) -> &CycleTable {
        &self.cycle
    }

    #[inline]
    pub fn next_model(&self, element: Element) -> Element {
        self.cycle.next_model(element)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
