use yew::prelude::*;

use super::icons::{icon_check, icon_x};
use crate::notify::{Toast, ToastLevel};

#[derive(Properties, PartialEq)]
pub struct ToastContainerProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastContainer)]
pub fn toast_container(props: &ToastContainerProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col font-sans">
            { for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.clone();
                let (accent, icon) = match toast.level {
                    ToastLevel::Success => ("border-l-4 border-green-500", icon_check(18)),
                    ToastLevel::Error => ("border-l-4 border-red-500", icon_x(18)),
                };
                html! {
                    <div
                        key={id}
                        class={classes!("relative", "flex", "p-3", "min-h-[64px]", "rounded-md", "justify-between", "overflow-hidden", "cursor-pointer", "bg-white", "shadow-md", "my-2", "max-w-[60vw]", "md:max-w-[350px]", accent)}
                        onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(id))}
                    >
                        <div class="text-sm font-medium text-gray-800 flex items-center gap-2">
                            { icon }
                            <span>{ toast.message.clone() }</span>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
