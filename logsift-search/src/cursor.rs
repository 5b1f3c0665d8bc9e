//! Stateless, direction-aware scanning over a live ordered view.
//!
//! Nothing here caches indices: every [`scan`] reads the current size and
//! re-resolves the start position, so the view may be re-sorted, filtered or
//! appended to between calls.

use std::fmt::Debug;
use std::rc::Rc;

/// An ordered, indexable view whose rows are addressed by opaque positions.
///
/// Indices are only valid for the duration of a single call; positions are
/// what callers keep around.
pub trait SearchDataModel {
    type Item;
    type Position: Clone + Debug;

    /// Number of rows currently visible.
    fn size(&self) -> usize;

    /// Row at `index`. `index` is always in `0..size()`.
    fn value_at(&self, index: usize) -> Self::Item;

    /// Position of the row at `index`. `index` is always in `0..size()`.
    fn index_to_position(&self, index: usize) -> Self::Position;

    /// Current index of `position`, or `None` if the row is not visible.
    fn position_to_index(&self, position: &Self::Position) -> Option<usize>;
}

impl<D: SearchDataModel + ?Sized> SearchDataModel for &D {
    type Item = D::Item;
    type Position = D::Position;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn value_at(&self, index: usize) -> Self::Item {
        (**self).value_at(index)
    }

    fn index_to_position(&self, index: usize) -> Self::Position {
        (**self).index_to_position(index)
    }

    fn position_to_index(&self, position: &Self::Position) -> Option<usize> {
        (**self).position_to_index(position)
    }
}

impl<D: SearchDataModel + ?Sized> SearchDataModel for Rc<D> {
    type Item = D::Item;
    type Position = D::Position;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn value_at(&self, index: usize) -> Self::Item {
        (**self).value_at(index)
    }

    fn index_to_position(&self, index: usize) -> Self::Position {
        (**self).index_to_position(index)
    }

    fn position_to_index(&self, position: &Self::Position) -> Option<usize> {
        (**self).position_to_index(position)
    }
}

/// A `Vec`-backed model where positions are plain indices.
#[derive(Debug, Clone, Default)]
pub struct ListDataModel<T> {
    items: Vec<T>,
}

impl<T> ListDataModel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for ListDataModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> SearchDataModel for ListDataModel<T> {
    type Item = T;
    type Position = usize;

    fn size(&self) -> usize {
        self.items.len()
    }

    fn value_at(&self, index: usize) -> T {
        self.items[index].clone()
    }

    fn index_to_position(&self, index: usize) -> usize {
        index
    }

    fn position_to_index(&self, position: &usize) -> Option<usize> {
        (*position < self.items.len()).then_some(*position)
    }
}

/// Decides whether a row is a hit.
pub trait ItemPredicate<T: ?Sized> {
    fn test(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> ItemPredicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl Direction {
    /// The same direction, but the row at the start position is a candidate too.
    pub fn also_search_current(self) -> SearchDirection {
        SearchDirection {
            direction: self,
            include_current: true,
        }
    }
}

/// A direction plus whether the start row itself may be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchDirection {
    pub direction: Direction,
    pub include_current: bool,
}

impl From<Direction> for SearchDirection {
    fn from(direction: Direction) -> Self {
        Self {
            direction,
            include_current: false,
        }
    }
}

/// Find the first row matching `predicate`, starting at `from` and moving in
/// `direction`. Does not wrap around.
///
/// A missing `from`, or one the view can no longer resolve, starts before the
/// first row (forward) or after the last row (backward); the whole view is
/// then scanned.
pub fn scan<D, F>(
    data: &D,
    predicate: &F,
    from: Option<&D::Position>,
    direction: impl Into<SearchDirection>,
) -> Option<(D::Item, D::Position)>
where
    D: SearchDataModel + ?Sized,
    F: ItemPredicate<D::Item> + ?Sized,
{
    let SearchDirection {
        direction,
        include_current,
    } = direction.into();
    let size = data.size();
    if size == 0 {
        return None;
    }

    let start = from.and_then(|p| {
        let index = data.position_to_index(p);
        if index.is_none() {
            log::trace!("Start position {:?} is not visible, scanning from the edge", p);
        }
        index.filter(|&i| i < size)
    });

    let hit = match direction {
        Direction::Forward => {
            let first = match start {
                Some(i) if include_current => i,
                Some(i) => i + 1,
                None => 0,
            };
            (first..size).find_map(|i| check(data, predicate, i))
        }
        Direction::Backward => {
            let last = match start {
                Some(i) if include_current => i + 1,
                Some(i) => i,
                None => size,
            };
            (0..last).rev().find_map(|i| check(data, predicate, i))
        }
    };
    hit.map(|(index, item)| (item, data.index_to_position(index)))
}

fn check<D, F>(data: &D, predicate: &F, index: usize) -> Option<(usize, D::Item)>
where
    D: SearchDataModel + ?Sized,
    F: ItemPredicate<D::Item> + ?Sized,
{
    let item = data.value_at(index);
    predicate.test(&item).then_some((index, item))
}
