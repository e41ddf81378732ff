/// Ordered items with a cursor that always points at a valid index.
///
/// An empty list keeps the cursor at 0 and reports no selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectableList {
    items: Vec<String>,
    selected: usize,
}

impl SelectableList {
    #[cfg(test)]
    pub fn new(items: Vec<String>) -> Self {
        let mut list = Self::default();
        list.replace(items);
        list
    }

    /// Swaps in a new item set, keeping the cursor when it is still in range.
    pub fn replace(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = self.selected.min(self.len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
