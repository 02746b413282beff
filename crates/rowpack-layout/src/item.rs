//! Input items and their resolved layout counterparts.

use serde::Serialize;
use std::fmt;

use crate::error::{LayoutError, Result};

/// An immutable layout input: aspect ratio, optional identity key and an
/// opaque content handle.
///
/// The content handle is never inspected by the layout; it only takes part
/// in equality so that replacing an item's content is seen as a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item<K, C = ()> {
    aspect_ratio: f32,
    key: Option<K>,
    content: C,
}

impl<K, C> Item<K, C> {
    /// Create an item without an identity key.
    pub fn new(aspect_ratio: f32, content: C) -> Result<Self> {
        validate_aspect_ratio(aspect_ratio, None)?;
        Ok(Self {
            aspect_ratio,
            key: None,
            content,
        })
    }

    /// Create an item with an identity key.
    ///
    /// The key is echoed back in the validation error when the aspect ratio
    /// is rejected.
    pub fn keyed(aspect_ratio: f32, key: K, content: C) -> Result<Self>
    where
        K: fmt::Display,
    {
        validate_aspect_ratio(aspect_ratio, Some(&key as &dyn fmt::Display))?;
        Ok(Self {
            aspect_ratio,
            key: Some(key),
            content,
        })
    }

    /// Attach or replace the identity key.
    #[must_use]
    pub fn with_key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }

    /// Width-to-height ratio, always finite and positive.
    #[must_use]
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Identity key, if the caller supplied one.
    #[must_use]
    pub const fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Opaque content handle.
    #[must_use]
    pub const fn content(&self) -> &C {
        &self.content
    }
}

fn validate_aspect_ratio(aspect_ratio: f32, key: Option<&dyn fmt::Display>) -> Result<()> {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        return Ok(());
    }
    Err(LayoutError::InvalidAspectRatio {
        aspect_ratio,
        key: key.map(ToString::to_string),
    })
}

/// An item with its resolved pixel dimensions.
///
/// Every `LayoutItem` in a row shares the same `height`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutItem<K, C = ()> {
    /// The input item this was laid out from.
    pub item: Item<K, C>,
    /// Resolved width in pixels.
    pub width: u32,
    /// Resolved height in pixels.
    pub height: u32,
}

impl<K, C> LayoutItem<K, C> {
    /// Aspect ratio of the underlying item.
    #[must_use]
    pub const fn aspect_ratio(&self) -> f32 {
        self.item.aspect_ratio
    }

    /// Identity key of the underlying item.
    #[must_use]
    pub const fn key(&self) -> Option<&K> {
        self.item.key()
    }

    /// Content handle of the underlying item.
    #[must_use]
    pub const fn content(&self) -> &C {
        self.item.content()
    }
}

/// Collects validated items in order, failing fast on the first bad one.
#[derive(Debug, Clone)]
pub struct ItemListBuilder<K, C = ()> {
    items: Vec<Item<K, C>>,
}

impl<K, C> Default for ItemListBuilder<K, C> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K, C> ItemListBuilder<K, C> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single item without an identity key.
    pub fn unkeyed(&mut self, aspect_ratio: f32, content: C) -> Result<&mut Self> {
        self.items.push(Item::new(aspect_ratio, content)?);
        Ok(self)
    }

    /// Number of items collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish and return the items in insertion order.
    #[must_use]
    pub fn build(self) -> Vec<Item<K, C>> {
        self.items
    }
}

impl<K: fmt::Display, C> ItemListBuilder<K, C> {
    /// Add a single item.
    pub fn item(&mut self, aspect_ratio: f32, key: Option<K>, content: C) -> Result<&mut Self> {
        let item = match key {
            Some(key) => Item::keyed(aspect_ratio, key, content)?,
            None => Item::new(aspect_ratio, content)?,
        };
        self.items.push(item);
        Ok(self)
    }

    /// Add one item per element of `source`, extracting the key, aspect
    /// ratio and content with the given closures.
    pub fn items<T, I, FK, FA, FC>(
        &mut self,
        source: I,
        key: FK,
        aspect_ratio: FA,
        content: FC,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        FK: Fn(&T) -> Option<K>,
        FA: Fn(&T) -> f32,
        FC: Fn(T) -> C,
    {
        for element in source {
            let k = key(&element);
            let ratio = aspect_ratio(&element);
            self.item(ratio, k, content(element))?;
        }
        Ok(self)
    }
}
