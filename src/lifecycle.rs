use std::cell::Cell;
use std::rc::Rc;

/// Shared "view still mounted" flag. Async tasks check it before writing
/// state so results that land after teardown are dropped.
#[derive(Clone, Debug)]
pub struct MountFlag(Rc<Cell<bool>>);

impl MountFlag {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }
}

impl Default for MountFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = MountFlag::new();
        let task_copy = flag.clone();
        assert!(task_copy.is_mounted());
        flag.unmount();
        assert!(!task_copy.is_mounted());
    }
}
