use std::rc::Rc;

use yew::prelude::*;

use super::dashboard::DashboardPage;
use super::sidebar::Sidebar;
use super::toast::ToastContainer;
use super::{location_path, Services};
use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::notify::ToastQueue;
use crate::panel::NavId;
use crate::timer::{BrowserTimer, Timer};

#[derive(Properties, PartialEq)]
struct SectionPlaceholderProps {
    title: &'static str,
    message: &'static str,
}

#[function_component(SectionPlaceholder)]
fn section_placeholder(props: &SectionPlaceholderProps) -> Html {
    html! {
        <div class="min-h-screen bg-[#F8FAFC] p-4 sm:p-8">
            <h1 class="text-xl sm:text-3xl font-bold text-[#0F172A] mb-4">{ props.title }</h1>
            <div class="bg-white rounded-lg shadow-md p-6 text-gray-600">{ props.message }</div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let force = use_force_update();
    let services = {
        let force = force.clone();
        use_memo(
            move |_| {
                let config = AppConfig::load();
                let timer: Rc<dyn Timer> = Rc::new(BrowserTimer);
                let toasts = ToastQueue::new(
                    timer.clone(),
                    config.toast_auto_dismiss_ms,
                    Rc::new(move || force.force_update()),
                );
                log::info!("API base url: {}", config.api_base_url);
                Services {
                    api: Rc::new(ApiClient::new(config.clone())),
                    config: Rc::new(config),
                    toasts,
                    timer,
                }
            },
            (),
        )
    };
    let section =
        use_state(|| NavId::from_path(&location_path()).unwrap_or(NavId::Dashboard));

    let on_section_change = {
        let section = section.clone();
        Callback::from(move |title: String| match NavId::from_title(&title) {
            Some(id) => section.set(id),
            None => log::warn!("Unknown section requested: {}", title),
        })
    };
    let on_dismiss = {
        let toasts = services.toasts.clone();
        Callback::from(move |id: u64| toasts.dismiss(id))
    };

    let content = match *section {
        NavId::Dashboard => html! {
            <DashboardPage services={(*services).clone()} on_section_change={on_section_change.clone()} />
        },
        NavId::Account => html! {
            <SectionPlaceholder title="Account" message="Sign in or manage your profile from the account page." />
        },
        NavId::Transactions => html! {
            <SectionPlaceholder title="Transactions" message="Your transaction history appears here." />
        },
    };

    html! {
        <div class="flex min-h-screen bg-[#F8FAFC]">
            <Sidebar breakpoint_px={services.config.mobile_breakpoint_px} active={*section} on_section_change={on_section_change} />
            <main class="flex-1 overflow-y-auto">
                { content }
            </main>
            <ToastContainer toasts={services.toasts.toasts()} on_dismiss={on_dismiss} />
        </div>
    }
}
