//! Point-to-key resolution map handed to the input source

use crate::geometry::{Point, Rect};
use crate::key::KeyValue;

/// A key occupying a region of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRegion {
    pub bounds: Rect,
    pub key: KeyValue,
}

/// Maps screen regions to the keys drawn there
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointToKeyMap {
    regions: Vec<KeyRegion>,
}

impl PointToKeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bounds: Rect, key: KeyValue) {
        self.regions.push(KeyRegion { bounds, key });
    }

    /// Key under the point; the first matching region wins
    pub fn resolve(&self, point: Point) -> Option<&KeyValue> {
        self.regions
            .iter()
            .find(|region| region.bounds.contains(point))
            .map(|region| &region.key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<KeyRegion> for PointToKeyMap {
    fn from_iter<I: IntoIterator<Item = KeyRegion>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}
