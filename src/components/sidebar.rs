use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use super::icons::{
    icon_arrows_left_right, icon_layout_dashboard, icon_menu, icon_move_left, icon_move_right,
    icon_user_round, icon_x,
};
use super::location_path;
use crate::panel::{NavId, PanelController, ViewportObserver, WindowViewport, NAV_ENTRIES};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub breakpoint_px: u32,
    /// Section shown by the app; the highlight follows it.
    pub active: NavId,
    pub on_section_change: Callback<String>,
}

fn nav_icon(id: NavId) -> Html {
    match id {
        NavId::Dashboard => icon_layout_dashboard(24),
        NavId::Account => icon_user_round(24),
        NavId::Transactions => icon_arrows_left_right(24),
    }
}

// Runs a panel action and re-renders only when it changed something.
fn panel_action(
    panel: &Rc<RefCell<PanelController>>,
    force: &UseForceUpdateHandle,
    action: fn(&mut PanelController) -> bool,
) -> Callback<MouseEvent> {
    let panel = panel.clone();
    let force = force.clone();
    Callback::from(move |_: MouseEvent| {
        if action(&mut panel.borrow_mut()) {
            force.force_update();
        }
    })
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let force = use_force_update();
    let breakpoint_px = props.breakpoint_px;
    let panel = use_mut_ref(move || {
        PanelController::new(WindowViewport.width(), breakpoint_px, &location_path())
    });

    {
        let panel = panel.clone();
        let force = force.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = WindowViewport.subscribe(Box::new(move |width: u32| {
                    let changed = panel.borrow_mut().on_viewport_width(width);
                    if changed {
                        force.force_update();
                    }
                }));
                move || drop(subscription)
            },
            (),
        );
    }

    panel.borrow_mut().set_active(props.active);
    let controller = panel.borrow().clone();
    let state = controller.state();
    let show_labels = controller.shows_labels();

    let open_menu = panel_action(&panel, &force, PanelController::open);
    let close_panel = panel_action(&panel, &force, PanelController::close);
    let close_backdrop = panel_action(&panel, &force, PanelController::close);
    let toggle_expand = panel_action(&panel, &force, PanelController::toggle_expand);

    let nav = NAV_ENTRIES.iter().map(|entry| {
        let id = entry.id;
        let is_active = state.active_item == id;
        let on_click = {
            let panel = panel.clone();
            let force = force.clone();
            let navigator = props.on_section_change.clone();
            Callback::from(move |_: MouseEvent| {
                panel.borrow_mut().select_item(id, &navigator);
                force.force_update();
            })
        };
        let layout = if show_labels {
            "justify-start space-x-4 px-4"
        } else {
            "justify-center"
        };
        let tone = if is_active {
            "bg-[#2563EB] text-white"
        } else {
            "hover:bg-gray-700 text-gray-300"
        };
        html! {
            <div
                key={entry.path}
                onclick={on_click}
                class={classes!("flex", "items-center", "py-3", "rounded-md", "cursor-pointer", "transition-all", "duration-300", layout, tone)}
            >
                { nav_icon(id) }
                { if show_labels {
                    html! { <span class="text-sm font-medium">{ entry.title }</span> }
                } else {
                    html! {}
                } }
            </div>
        }
    });

    html! {
        <>
            { if state.is_mobile_viewport {
                html! {
                    <button class="fixed top-4 left-4 z-50 bg-gray-800 p-2 rounded-md text-white" aria-label="Open menu" onclick={open_menu}>
                        { icon_menu(24) }
                    </button>
                }
            } else {
                html! {}
            } }

            { if state.is_open {
                html! {
                    <div
                        class={classes!("fixed", "md:relative", "bg-gray-800", "text-white", "flex", "flex-col", "shadow-lg", "z-50", "min-h-screen", "transition-all", "duration-300", "ease-in-out", controller.width_class())}
                    >
                        { if state.is_mobile_viewport {
                            html! {
                                <button class="absolute top-4 right-4 p-2 text-white" aria-label="Close menu" onclick={close_panel}>
                                    { icon_x(24) }
                                </button>
                            }
                        } else {
                            html! {}
                        } }

                        <div class={classes!("flex", "items-center", "px-5", "py-6", "transition-all", "duration-300", if show_labels { "justify-start space-x-4" } else { "justify-center" })}>
                            <span class="w-10 h-10 bg-rose-500 rounded-full flex items-center justify-center text-xl font-bold">{"T"}</span>
                            { if show_labels {
                                html! { <span class="text-xl font-bold tracking-wide">{"Tracker"}</span> }
                            } else {
                                html! {}
                            } }
                        </div>

                        { if !state.is_mobile_viewport {
                            html! {
                                <button
                                    class="absolute top-8 -right-3 w-7 h-7 bg-gray-700 rounded-full flex items-center justify-center hover:bg-gray-600 transition-all"
                                    aria-label={if state.is_expanded { "Collapse menu" } else { "Expand menu" }}
                                    onclick={toggle_expand}
                                >
                                    { if state.is_expanded { icon_move_left(16) } else { icon_move_right(16) } }
                                </button>
                            }
                        } else {
                            html! {}
                        } }

                        <div class="mt-10 space-y-2 px-2">
                            { for nav }
                        </div>
                    </div>
                }
            } else {
                html! {}
            } }

            { if controller.shows_backdrop() {
                html! { <div class="fixed inset-0 bg-black opacity-50 z-40" onclick={close_backdrop}></div> }
            } else {
                html! {}
            } }
        </>
    }
}
