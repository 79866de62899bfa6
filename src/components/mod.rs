pub mod app;
pub mod cards;
pub mod dashboard;
pub mod forms;
pub mod icons;
pub mod modal;
pub mod sidebar;
pub mod toast;

use std::rc::Rc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::notify::ToastQueue;
use crate::timer::Timer;

pub use app::App;

/// Collaborators shared by every component, created once by [`App`].
#[derive(Clone)]
pub struct Services {
    pub config: Rc<AppConfig>,
    pub api: Rc<ApiClient>,
    pub toasts: ToastQueue,
    pub timer: Rc<dyn Timer>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && Rc::ptr_eq(&self.api, &other.api)
    }
}

pub(crate) fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

/// Adds or removes `overflow-hidden` on the document body.
pub(crate) fn set_body_scroll_lock(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let result = if locked {
        classes.add_1("overflow-hidden")
    } else {
        classes.remove_1("overflow-hidden")
    };
    if let Err(e) = result {
        log::warn!("Could not toggle body scroll lock: {:?}", e);
    }
}
