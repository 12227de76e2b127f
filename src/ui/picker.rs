use crate::core::persona::PersonaCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// Highlight state for the persona selection screen.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub items: Vec<PickerItem>,
    pub selected: usize,
}

impl PickerState {
    pub fn new(items: Vec<PickerItem>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn from_catalog(catalog: &PersonaCatalog) -> Self {
        Self::new(
            catalog
                .list()
                .iter()
                .map(|p| PickerItem {
                    id: p.id.clone(),
                    label: p.display_name.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        )
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.items.get(self.selected).map(|i| i.id.as_str())
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn move_up(&mut self) {
        if !self.items.is_empty() {
            if self.selected == 0 {
                self.selected = self.items.len() - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_wraps_both_ways() {
        let mut picker = PickerState::from_catalog(&PersonaCatalog::builtin());
        assert_eq!(picker.selected_id(), Some("awafi"));

        picker.move_up();
        assert_eq!(picker.selected_id(), Some("qubtan"));
        picker.move_down();
        assert_eq!(picker.selected_id(), Some("awafi"));
        picker.move_down();
        assert_eq!(picker.selected_id(), Some("afia"));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut picker = PickerState::from_catalog(&PersonaCatalog::builtin());
        assert!(picker.select(7));
        assert_eq!(picker.selected_id(), Some("qubtan"));
        assert!(!picker.select(8));
        assert_eq!(picker.selected, 7);
    }

    #[test]
    fn empty_picker_is_inert() {
        let mut picker = PickerState::new(Vec::new());
        picker.move_up();
        picker.move_down();
        assert_eq!(picker.selected_id(), None);
    }
}
