//! Bounded sliding-window pager for the feature list's page tabs.
//!
//! Renders a fixed number of page buttons (a "window") over a larger page
//! count. Transitions are pure: each operation consumes `&self` and returns
//! the next window value, so callers never share a mutable tab array.

/// Number of page tabs shown at once.
pub const VISIBLE_TABS: usize = 3;

/// How `jump` treats a target page outside the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPolicy {
    /// Leave the window untouched. Matches the shipped web UI, where a
    /// direct page selection never moved the tab row, so the current page
    /// could end up outside it.
    #[default]
    KeepWindow,
    /// Slide the window to a consecutive run containing the target page.
    Realign,
}

/// A window of consecutive page numbers plus the caller's current page.
///
/// Invariants: tabs are consecutive, start at 1 or later, never exceed the
/// total page count, and there are `min(VISIBLE_TABS, total)` of them.
/// `advance`/`retreat` keep the current page inside the window; `jump` under
/// [`JumpPolicy::KeepWindow`] may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    tabs: Vec<usize>,
    current: usize,
    total: usize,
    policy: JumpPolicy,
}

impl PageWindow {
    /// Leading window over `total` pages: tabs `[1..=min(VISIBLE_TABS,
    /// total)]`, current page 1.
    pub fn new(total: usize) -> Self {
        Self::with_policy(total, JumpPolicy::default())
    }

    pub fn with_policy(total: usize, policy: JumpPolicy) -> Self {
        Self {
            tabs: (1..=total.min(VISIBLE_TABS)).collect(),
            current: 1,
            total,
            policy,
        }
    }

    pub fn tabs(&self) -> &[usize] {
        &self.tabs
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total
    }

    /// Step to the next page.
    ///
    /// No-op while the whole range already fits in the window or the current
    /// page is the last one. Otherwise the current page increments and the
    /// window slides one step forward until its last tab reaches the total;
    /// after that the window parks and the current page walks to the end.
    #[must_use]
    pub fn advance(&self) -> Self {
        if self.total <= VISIBLE_TABS || self.current >= self.total {
            return self.clone();
        }
        let mut next = self.clone();
        next.current += 1;
        if let Some(&last) = next.tabs.last() {
            if last < next.total {
                next.tabs.push(last + 1);
                next.tabs.remove(0);
            }
        }
        next
    }

    /// Step to the previous page.
    ///
    /// No-op while the window's first tab is 1 (the control is driven by the
    /// window, not the current page). Otherwise the current page decrements
    /// and the window slides one step back whenever the current page would
    /// fall off its left edge; this makes `retreat` the exact inverse of
    /// `advance`.
    #[must_use]
    pub fn retreat(&self) -> Self {
        let Some(&first) = self.tabs.first() else {
            return self.clone();
        };
        if first <= 1 {
            return self.clone();
        }
        let mut next = self.clone();
        next.current = next.current.saturating_sub(1).max(1);
        if next.current < first {
            next.tabs.pop();
            next.tabs.insert(0, first - 1);
        }
        next
    }

    /// Select a page directly. The window only follows under
    /// [`JumpPolicy::Realign`].
    #[must_use]
    pub fn jump(&self, page: usize) -> Self {
        let mut next = self.clone();
        next.current = page;
        if next.policy == JumpPolicy::Realign {
            next.tabs = realigned_tabs(page, next.total);
        }
        next
    }

    /// Rebuild for a new total after the item count changes. The window
    /// resets to the leading tabs; the current page is clamped into range.
    #[must_use]
    pub fn resized(&self, total: usize) -> Self {
        let mut next = Self::with_policy(total, self.policy);
        next.current = self.current.clamp(1, total.max(1));
        next
    }
}

/// Number of pages needed to show `item_count` items `page_limit` at a time.
pub fn total_pages(item_count: u64, page_limit: usize) -> usize {
    if page_limit == 0 {
        return 0;
    }
    item_count.div_ceil(page_limit as u64) as usize
}

fn realigned_tabs(page: usize, total: usize) -> Vec<usize> {
    let len = total.min(VISIBLE_TABS);
    if len == 0 {
        return Vec::new();
    }
    let target = page.clamp(1, total);
    let first = target.min(total + 1 - len).max(1);
    (first..first + len).collect()
}
