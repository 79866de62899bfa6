use yew::prelude::*;

use super::icons::{icon_basket, icon_person, icon_wallet};
use crate::config::AppConfig;
use crate::format::format_currency;

#[derive(Clone, Copy, PartialEq)]
pub enum CardIcon {
    Wallet,
    Basket,
    Person,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: i64,
    pub icon: CardIcon,
    pub bg_class: &'static str,
    pub config: AppConfig,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let icon = match props.icon {
        CardIcon::Wallet => icon_wallet(32),
        CardIcon::Basket => icon_basket(32),
        CardIcon::Person => icon_person(32),
    };
    let value = format_currency(
        props.amount,
        &props.config.currency_prefix,
        props.config.thousands_separator,
    );

    html! {
        <div class={classes!("flex", "flex-col", "items-start", "p-5", "rounded-lg", "shadow-md", "text-white", props.bg_class)}>
            <div class="flex items-center space-x-4">
                <span class="text-white">{ icon }</span>
                <h3 class="text-lg font-semibold">{ props.title }</h3>
            </div>
            <div class="mt-3">
                <h4 class="text-2xl font-bold">{ value }</h4>
            </div>
        </div>
    }
}
