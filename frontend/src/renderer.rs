use slots_shared::session::{Renderer, UiState};
use yew::functional::UseStateSetter;

/// Feeds controller snapshots into the root component's state, which re-renders the tree.
pub struct StateRenderer {
    setter: UseStateSetter<UiState>,
}

impl StateRenderer {
    pub fn new(setter: UseStateSetter<UiState>) -> Self {
        Self { setter }
    }
}

impl Renderer for StateRenderer {
    fn render(&self, state: &UiState) {
        self.setter.set(state.clone());
    }
}
