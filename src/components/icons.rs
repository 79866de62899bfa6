use yew::prelude::*;

fn icon_base(path: &'static str, size: u32) -> Html {
    html! {
        <svg width={size.to_string()} height={size.to_string()} viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_wallet(size: u32) -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2", size)
}
pub fn icon_basket(size: u32) -> Html {
    icon_base("M5 10h14l-1.5 9h-11zM9 10l3-6 3 6", size)
}
pub fn icon_person(size: u32) -> Html {
    icon_base("M12 12a4 4 0 100-8 4 4 0 000 8zM4 21a8 8 0 0116 0", size)
}
pub fn icon_check(size: u32) -> Html {
    icon_base("M20 6L9 17l-5-5", size)
}
pub fn icon_calendar(size: u32) -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 10h18", size)
}
pub fn icon_layout_dashboard(size: u32) -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z", size)
}
pub fn icon_user_round(size: u32) -> Html {
    icon_base("M12 12m-10 0a10 10 0 1020 0 10 10 0 10-20 0M8 10a4 4 0 108 0 4 4 0 10-8 0M6 19a7 7 0 0112 0", size)
}
pub fn icon_arrows_left_right(size: u32) -> Html {
    icon_base("M8 3L4 7l4 4M4 7h16M16 21l4-4-4-4M20 17H4", size)
}
pub fn icon_move_right(size: u32) -> Html {
    icon_base("M18 8l4 4-4 4M2 12h20", size)
}
pub fn icon_move_left(size: u32) -> Html {
    icon_base("M6 8l-4 4 4 4M2 12h20", size)
}
pub fn icon_menu(size: u32) -> Html {
    icon_base("M4 6h16M4 12h16M4 18h16", size)
}
pub fn icon_x(size: u32) -> Html {
    icon_base("M18 6L6 18M6 6l12 12", size)
}
