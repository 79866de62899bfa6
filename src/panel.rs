use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavId {
    Dashboard,
    Account,
    Transactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub id: NavId,
    pub title: &'static str,
    pub path: &'static str,
}

pub const NAV_ENTRIES: [NavEntry; 3] = [
    NavEntry {
        id: NavId::Dashboard,
        title: "Dashboard",
        path: "/Dashboard",
    },
    NavEntry {
        id: NavId::Account,
        title: "Account",
        path: "/Account",
    },
    NavEntry {
        id: NavId::Transactions,
        title: "Transactions",
        path: "/TransactionBar",
    },
];

impl NavId {
    pub fn entry(self) -> &'static NavEntry {
        NAV_ENTRIES
            .iter()
            .find(|entry| entry.id == self)
            .unwrap_or(&NAV_ENTRIES[0])
    }

    pub fn title(self) -> &'static str {
        self.entry().title
    }

    pub fn from_path(path: &str) -> Option<NavId> {
        NAV_ENTRIES
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.id)
    }

    pub fn from_title(title: &str) -> Option<NavId> {
        NAV_ENTRIES
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| entry.id)
    }
}

/// External router hook; the panel never navigates on its own.
pub trait SectionNavigator {
    fn on_section_change(&self, section: &str);
}

impl SectionNavigator for yew::Callback<String> {
    fn on_section_change(&self, section: &str) {
        self.emit(section.to_string());
    }
}

/// Source of viewport width changes.
pub trait ViewportObserver {
    fn width(&self) -> u32;
    fn subscribe(&self, listener: Box<dyn Fn(u32)>) -> ViewportSubscription;
}

/// Unsubscribes when dropped.
pub struct ViewportSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl ViewportSubscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for ViewportSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Window `resize` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowViewport;

fn window_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

impl ViewportObserver for WindowViewport {
    fn width(&self) -> u32 {
        window_width()
    }

    fn subscribe(&self, listener: Box<dyn Fn(u32)>) -> ViewportSubscription {
        let Some(window) = web_sys::window() else {
            log::warn!("No window available; viewport changes will not be observed");
            return ViewportSubscription::new(|| ());
        };
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            listener(window_width());
        }) as Box<dyn FnMut(Event)>);
        if let Err(e) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to observe resize events: {:?}", e);
        }
        ViewportSubscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            drop(closure);
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub is_mobile_viewport: bool,
    pub is_open: bool,
    pub is_expanded: bool,
    pub active_item: NavId,
}

/// Open/closed and expanded/collapsed state of the navigation panel.
/// On desktop the panel is always open; on mobile `is_expanded` is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelController {
    state: PanelState,
    breakpoint_px: u32,
}

impl PanelController {
    pub fn new(width: u32, breakpoint_px: u32, location_path: &str) -> Self {
        let is_mobile_viewport = width < breakpoint_px;
        Self {
            state: PanelState {
                is_mobile_viewport,
                is_open: !is_mobile_viewport,
                is_expanded: true,
                active_item: NavId::from_path(location_path).unwrap_or(NavId::Dashboard),
            },
            breakpoint_px,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Returns true when the state changed. Only crossings of the
    /// breakpoint touch `is_open`.
    pub fn on_viewport_width(&mut self, width: u32) -> bool {
        let is_mobile = width < self.breakpoint_px;
        if is_mobile == self.state.is_mobile_viewport {
            return false;
        }
        self.state.is_mobile_viewport = is_mobile;
        self.state.is_open = !is_mobile;
        true
    }

    pub fn open(&mut self) -> bool {
        self.set_open(true)
    }

    /// Close button and backdrop.
    pub fn close(&mut self) -> bool {
        self.set_open(false)
    }

    pub fn toggle_open(&mut self) -> bool {
        self.set_open(!self.state.is_open)
    }

    fn set_open(&mut self, open: bool) -> bool {
        if !self.state.is_mobile_viewport || self.state.is_open == open {
            return false;
        }
        self.state.is_open = open;
        true
    }

    pub fn toggle_expand(&mut self) -> bool {
        if self.state.is_mobile_viewport {
            return false;
        }
        self.state.is_expanded = !self.state.is_expanded;
        true
    }

    pub fn select_item(&mut self, item: NavId, navigator: &dyn SectionNavigator) {
        self.state.active_item = item;
        navigator.on_section_change(item.title());
        if self.state.is_mobile_viewport {
            self.state.is_open = false;
        }
    }

    /// Follows a section change made outside the panel. Does not notify
    /// the navigator or close the panel.
    pub fn set_active(&mut self, item: NavId) -> bool {
        if self.state.active_item == item {
            return false;
        }
        self.state.active_item = item;
        true
    }

    pub fn shows_labels(&self) -> bool {
        self.state.is_mobile_viewport || self.state.is_expanded
    }

    pub fn shows_backdrop(&self) -> bool {
        self.state.is_mobile_viewport && self.state.is_open
    }

    pub fn width_class(&self) -> &'static str {
        if self.state.is_mobile_viewport {
            "w-3/4"
        } else if self.state.is_expanded {
            "w-64"
        } else {
            "w-20"
        }
    }
}
