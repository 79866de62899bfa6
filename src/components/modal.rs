use yew::prelude::*;

use crate::overlay::OverlayView;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub view: OverlayView,
    pub title: &'static str,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Presentational shell; mounting and timing come from the overlay
/// controller through `view`.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.view.is_present() {
        return html! {};
    }

    let visible = props.view.is_visible();
    let backdrop_class = if visible { "opacity-100" } else { "opacity-0" };
    let panel_class = if visible {
        "scale-100 translate-y-0 opacity-100"
    } else {
        "scale-90 translate-y-4 opacity-0"
    };
    let close_backdrop = props.on_close.clone();
    let close_button = props.on_close.clone();

    html! {
        <div
            class={classes!("fixed", "inset-0", "z-10", "flex", "items-center", "justify-center", "bg-gray-600", "bg-opacity-50", "backdrop-blur-sm", "transition-opacity", "duration-300", backdrop_class)}
            onclick={Callback::from(move |_: MouseEvent| close_backdrop.emit(()))}
        >
            <div
                class={classes!("bg-white", "rounded-lg", "shadow-lg", "w-full", "max-w-md", "p-6", "relative", "transform", "transition-transform", "duration-300", "max-h-screen", "overflow-y-auto", panel_class)}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <button
                    class="absolute top-4 right-4 text-gray-600 hover:text-gray-900"
                    aria-label="Close"
                    onclick={Callback::from(move |_: MouseEvent| close_button.emit(()))}
                >
                    {"✖"}
                </button>
                <h2 class="text-lg font-semibold text-[#0F172A]">{ props.title }</h2>
                <div class="p-4 sm:p-6">{ for props.children.iter() }</div>
            </div>
        </div>
    }
}
