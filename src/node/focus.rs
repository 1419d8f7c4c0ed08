/// A focus transition the owner must apply to its nodes (blur `lost`, then focus `gained`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange<K> {
    pub lost: Option<K>,
    pub gained: Option<K>,
}

/// Ordered ring of focusable keys with at most one current holder.
///
/// Every mutating call returns `Some(change)` only when the holder actually changes, so hooks
/// driven from it never fire redundantly.
#[derive(Clone, Debug)]
pub struct FocusRing<K> {
    order: Vec<K>,
    current: Option<K>,
}

impl<K> Default for FocusRing<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            current: None,
        }
    }
}

impl<K: Clone + Eq> FocusRing<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Append `key`; it takes focus when nothing else holds it.
    pub fn insert(&mut self, key: K) -> Option<FocusChange<K>> {
        if !self.order.contains(&key) {
            self.order.push(key.clone());
        }
        if self.current.is_none() {
            return self.set_focus(&key);
        }
        None
    }

    /// Drop `key`; if it held focus, focus moves to the first remaining key.
    pub fn remove(&mut self, key: &K) -> Option<FocusChange<K>> {
        let idx = self.order.iter().position(|k| k == key)?;
        self.order.remove(idx);
        if self.current.as_ref() != Some(key) {
            return None;
        }
        let gained = self.order.first().cloned();
        let lost = std::mem::replace(&mut self.current, gained.clone());
        Some(FocusChange { lost, gained })
    }

    /// Focus `key`; a no-op when it is not in the ring or already focused.
    pub fn set_focus(&mut self, key: &K) -> Option<FocusChange<K>> {
        if !self.order.contains(key) || self.current.as_ref() == Some(key) {
            return None;
        }
        let lost = self.current.replace(key.clone());
        Some(FocusChange {
            lost,
            gained: Some(key.clone()),
        })
    }

    pub fn clear_focus(&mut self) -> Option<FocusChange<K>> {
        let lost = self.current.take()?;
        Some(FocusChange {
            lost: Some(lost),
            gained: None,
        })
    }

    /// Advance focus, wrapping past the last key.
    pub fn focus_next(&mut self) -> Option<FocusChange<K>> {
        self.step(1)
    }

    /// Move focus back, wrapping past the first key. With nothing focused the last key wins.
    pub fn focus_previous(&mut self) -> Option<FocusChange<K>> {
        self.step(-1)
    }

    fn step(&mut self, dir: isize) -> Option<FocusChange<K>> {
        let n = self.order.len();
        if n == 0 {
            return None;
        }
        let next = match self
            .current
            .as_ref()
            .and_then(|c| self.order.iter().position(|k| k == c))
        {
            Some(i) => (i as isize + dir).rem_euclid(n as isize) as usize,
            None if dir < 0 => n - 1,
            None => 0,
        };
        let key = self.order[next].clone();
        self.set_focus(&key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/focus.rs"]
mod tests;
