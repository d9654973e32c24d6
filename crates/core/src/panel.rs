//! Panel trait and the owning panel list.
//!
//! A panel is anything that draws itself once per frame through a [`Ui`].
//! The [`PanelList`] owns its panels exclusively; removing a panel or
//! dropping the list destroys it.

use std::any::Any;

use crate::Ui;

/// Trait for all lunar panels.
pub trait Panel: Any {
    /// Unique name for panel identification.
    fn name(&self) -> &str;

    /// Draw the panel and consume this frame's input.
    fn render(&mut self, ui: &mut dyn Ui);

    /// Downcast to concrete type (immutable).
    fn as_any(&self) -> &dyn Any;

    /// Downcast to concrete type (mutable).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Stable handle returned by [`PanelList::add_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(u64);

/// Ordered collection of owned panels rendered every frame.
#[derive(Default)]
pub struct PanelList {
    panels: Vec<(PanelId, Box<dyn Panel>)>,
    next_id: u64,
}

impl PanelList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a panel. Panels render in insertion order.
    pub fn add_panel(&mut self, panel: Box<dyn Panel>) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        log::debug!("Adding panel '{}' as {:?}", panel.name(), id);
        self.panels.push((id, panel));
        id
    }

    /// Remove and drop a panel. Returns `false` if the id is unknown.
    pub fn remove_panel(&mut self, id: PanelId) -> bool {
        match self.panels.iter().position(|(pid, _)| *pid == id) {
            Some(pos) => {
                let (_, panel) = self.panels.remove(pos);
                log::debug!("Removed panel '{}'", panel.name());
                true
            }
            None => false,
        }
    }

    /// Render every panel in order.
    pub fn render_all(&mut self, ui: &mut dyn Ui) {
        for (_, panel) in self.panels.iter_mut() {
            panel.render(ui);
        }
    }

    pub fn get(&self, id: PanelId) -> Option<&dyn Panel> {
        self.panels
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p.as_ref())
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut dyn Panel> {
        self.panels
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p.as_mut() as &mut dyn Panel)
    }

    /// Find the first panel of concrete type `T`.
    pub fn find_mut<T: Panel>(&mut self) -> Option<&mut T> {
        self.panels
            .iter_mut()
            .find_map(|(_, p)| p.as_any_mut().downcast_mut::<T>())
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel names in render order.
    pub fn names(&self) -> Vec<&str> {
        self.panels.iter().map(|(_, p)| p.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Named {
        name: &'static str,
        dropped: Rc<Cell<bool>>,
    }

    impl Drop for Named {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    impl Panel for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn render(&mut self, _ui: &mut dyn Ui) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn named(name: &'static str) -> (Box<dyn Panel>, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        (
            Box::new(Named {
                name,
                dropped: dropped.clone(),
            }),
            dropped,
        )
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut list = PanelList::new();
        list.add_panel(named("editor").0);
        list.add_panel(named("console").0);
        assert_eq!(list.names(), vec!["editor", "console"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_drops_panel() {
        let mut list = PanelList::new();
        let (panel, dropped) = named("editor");
        let id = list.add_panel(panel);
        assert!(!dropped.get());
        assert!(list.remove_panel(id));
        assert!(dropped.get());
        assert!(list.is_empty());
        assert!(!list.remove_panel(id));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut list = PanelList::new();
        let a = list.add_panel(named("a").0);
        list.remove_panel(a);
        let b = list.add_panel(named("b").0);
        assert_ne!(a, b);
        assert!(list.get(a).is_none());
        assert_eq!(list.get(b).map(|p| p.name()), Some("b"));
    }

    #[test]
    fn test_find_mut_downcasts() {
        let mut list = PanelList::new();
        list.add_panel(named("editor").0);
        let found = list.find_mut::<Named>();
        assert_eq!(found.map(|p| p.name), Some("editor"));
    }

    #[test]
    fn test_dropping_list_drops_panels() {
        let (panel, dropped) = named("editor");
        {
            let mut list = PanelList::new();
            list.add_panel(panel);
        }
        assert!(dropped.get());
    }
}
