use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::cards::{CardIcon, StatCard};
use super::forms::{AddPaymentForm, AddTransactionForm};
use super::icons::{icon_calendar, icon_check};
use super::modal::Modal;
use super::{set_body_scroll_lock, Services};
use crate::api::{BalanceStore, PaymentsApi, RemoteBalanceStore};
use crate::dashboard::{DashboardSnapshot, DashboardSynchronizer};
use crate::format::{format_currency, format_due_date};
use crate::lifecycle::MountFlag;
use crate::models::{MonthlyStat, OverlayKind, UpcomingPayment, User};
use crate::notify::Notifier;
use crate::overlay::OverlayController;
use crate::panel::NavId;
use crate::session::{query_session, GateView, SessionGate};

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub services: Services,
    pub on_section_change: Callback<String>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let force = use_force_update();
    let mount = use_memo(|_| MountFlag::new(), ());
    let gate = use_mut_ref(SessionGate::new);

    let sync = {
        let services = props.services.clone();
        let mount = (*mount).clone();
        let force = force.clone();
        use_memo(
            move |_| {
                let balance: Rc<dyn BalanceStore> =
                    Rc::new(RemoteBalanceStore::new((*services.api).clone()));
                let payments: Rc<dyn PaymentsApi> = services.api.clone();
                let notifier: Rc<dyn Notifier> = Rc::new(services.toasts.clone());
                DashboardSynchronizer::new(
                    balance,
                    payments,
                    notifier,
                    mount,
                    Rc::new(move || force.force_update()),
                )
            },
            (),
        )
    };

    let overlay = {
        let services = props.services.clone();
        let force = force.clone();
        use_memo(
            move |_| {
                OverlayController::new(
                    services.timer.clone(),
                    services.config.overlay_enter_delay_ms,
                    services.config.overlay_exit_delay_ms,
                    Rc::new(move || force.force_update()),
                )
            },
            (),
        )
    };

    {
        let services = props.services.clone();
        let mount = mount.clone();
        let gate = gate.clone();
        let sync = sync.clone();
        let force = force.clone();
        use_effect_with_deps(
            move |_| {
                let task_mount = (*mount).clone();
                spawn_local(async move {
                    let Some(outcome) = query_session(services.api.as_ref(), &task_mount).await
                    else {
                        return;
                    };
                    let authenticated = {
                        let mut gate = gate.borrow_mut();
                        gate.resolve(outcome) && gate.allows_fetch()
                    };
                    force.force_update();
                    if authenticated {
                        sync.sync().await;
                    }
                });
                move || mount.unmount()
            },
            (),
        );
    }

    let overlay_view = overlay.view();
    use_effect_with_deps(
        |present: &bool| {
            let locked = *present;
            if locked {
                set_body_scroll_lock(true);
            }
            move || {
                if locked {
                    set_body_scroll_lock(false);
                }
            }
        },
        overlay_view.is_present(),
    );

    let snapshot = sync.snapshot();
    let user = match page_stage(&gate.borrow(), &snapshot) {
        PageStage::Loading => return loading_view(),
        PageStage::LoginPrompt => return login_prompt(props.on_section_change.clone()),
        PageStage::Ready(user) => user,
    };
    let config = props.services.config.clone();

    let open_overlay = |kind: OverlayKind| {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| overlay.open(kind))
    };
    let on_close = {
        let overlay = overlay.clone();
        Callback::from(move |_: ()| overlay.close())
    };
    let on_mark_paid = {
        let sync = sync.clone();
        Callback::from(move |id: String| {
            let sync = sync.clone();
            spawn_local(async move {
                sync.mark_paid(&id).await;
            });
        })
    };
    let on_transaction_saved = {
        let overlay = overlay.clone();
        let sync = sync.clone();
        Callback::from(move |_: ()| {
            overlay.close();
            let sync = sync.clone();
            spawn_local(async move {
                sync.refresh_summary().await;
            });
        })
    };
    let on_payment_created = {
        let overlay = overlay.clone();
        let sync = sync.clone();
        Callback::from(move |payment: UpcomingPayment| {
            sync.add_payment(payment);
            overlay.close();
        })
    };

    let modal_body = if overlay_view.hosts(OverlayKind::TransactionForm) {
        html! { <AddTransactionForm services={props.services.clone()} on_saved={on_transaction_saved} /> }
    } else if overlay_view.hosts(OverlayKind::PaymentForm) {
        html! { <AddPaymentForm services={props.services.clone()} on_created={on_payment_created} /> }
    } else {
        html! {}
    };

    html! {
        <div class="min-h-screen bg-[#F8FAFC] p-4 sm:p-8">
            <div class="flex flex-col sm:flex-row sm:justify-between sm:items-center gap-4 mb-6 sm:mb-8">
                <h1 class="text-xl sm:text-3xl font-bold text-[#0F172A] text-center sm:text-left">
                    { welcome_line(&user) }
                </h1>
                <div class="flex space-x-4">
                    <button class="px-4 py-2 bg-[#2563EB] text-white rounded-md shadow hover:bg-[#1E40AF] transition-all w-full sm:w-auto" onclick={open_overlay(OverlayKind::TransactionForm)}>
                        {"+ Add Transaction"}
                    </button>
                    <button class="px-4 py-2 bg-[#2563EB] text-white rounded-md shadow hover:bg-[#1E40AF] transition-all w-full sm:w-auto" onclick={open_overlay(OverlayKind::PaymentForm)}>
                        {"+ Add Payment"}
                    </button>
                </div>
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6 mb-6 sm:mb-8">
                <StatCard title="Balance" amount={snapshot.summary.balance()} icon={CardIcon::Wallet} bg_class="bg-gradient-to-r from-[#1E40AF] to-[#2563EB]" config={(*config).clone()} />
                <StatCard title="Expenses" amount={snapshot.summary.expenses} icon={CardIcon::Basket} bg_class="bg-gradient-to-r from-[#DC2626] to-[#EF4444]" config={(*config).clone()} />
                <StatCard title="Income" amount={snapshot.summary.income} icon={CardIcon::Person} bg_class="bg-gradient-to-r from-[#059669] to-[#10B981]" config={(*config).clone()} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mb-6 sm:mb-8">
                <div class="lg:col-span-2 bg-white rounded-lg shadow-md p-6">
                    <h2 class="text-lg sm:text-xl font-medium text-[#0F172A] mb-4">{"Yearly Summary"}</h2>
                    { monthly_table(&snapshot.summary.monthly_stats, &props.services) }
                </div>
                <div class="bg-white rounded-lg shadow-md p-6">
                    <h2 class="text-lg sm:text-xl font-medium text-[#0F172A] mb-4">{"Total Report"}</h2>
                    <dl class="space-y-2 text-sm">
                        <div class="flex justify-between"><dt class="text-gray-600">{"Income"}</dt><dd class="font-semibold text-green-600">{ money(snapshot.summary.income, &props.services) }</dd></div>
                        <div class="flex justify-between"><dt class="text-gray-600">{"Expenses"}</dt><dd class="font-semibold text-red-500">{ money(snapshot.summary.expenses, &props.services) }</dd></div>
                    </dl>
                </div>
            </div>

            <div class="bg-white rounded-lg shadow-md p-6">
                <h2 class="text-lg sm:text-xl font-medium text-[#0F172A] mb-4">{"Upcoming Payments"}</h2>
                { payment_list(&snapshot, &props.services, on_mark_paid) }
            </div>

            <Modal view={overlay_view} title={overlay_view.kind.title()} on_close={on_close}>
                { modal_body }
            </Modal>
        </div>
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageStage {
    Loading,
    LoginPrompt,
    Ready(User),
}

// Content waits for the first sync so empty lists never stand in for
// data that is still on its way.
fn page_stage(gate: &SessionGate, snapshot: &DashboardSnapshot) -> PageStage {
    match gate.view() {
        GateView::Loading => PageStage::Loading,
        GateView::LoginPrompt => PageStage::LoginPrompt,
        GateView::Content(_) if !snapshot.synced => PageStage::Loading,
        GateView::Content(user) => PageStage::Ready(user.clone()),
    }
}

fn welcome_line(user: &User) -> String {
    let name = user.username.trim();
    if name.is_empty() {
        "Welcome Back 👋".to_string()
    } else {
        format!("Welcome back, {} 👋", name)
    }
}

fn money(amount: impl Into<i128>, services: &Services) -> String {
    format_currency(
        amount,
        &services.config.currency_prefix,
        services.config.thousands_separator,
    )
}

fn loading_view() -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#F8FAFC]">
            <div class="text-center">
                <div class="w-16 h-16 border-4 border-blue-500 border-t-transparent rounded-full animate-spin mx-auto"></div>
                <p class="mt-4 text-gray-600">{"Loading dashboard..."}</p>
            </div>
        </div>
    }
}

fn login_prompt(on_section_change: Callback<String>) -> Html {
    let on_login = Callback::from(move |_: MouseEvent| {
        on_section_change.emit(NavId::Account.title().to_string());
    });
    html! {
        <div class="flex flex-col items-center justify-center h-40 gap-5 bg-white shadow-lg rounded-lg p-6 border border-gray-200">
            <p class="text-gray-700 text-center font-semibold text-lg">
                {"Please log in to access your transactions."}
            </p>
            <button onclick={on_login} class="px-5 py-2 bg-blue-600 text-white font-medium rounded-lg shadow-md hover:bg-blue-700 transition-all duration-200">
                {"Log In"}
            </button>
        </div>
    }
}

fn monthly_table(stats: &[MonthlyStat], services: &Services) -> Html {
    if stats.is_empty() {
        return html! { <p class="text-gray-500">{"No monthly data yet"}</p> };
    }
    html! {
        <table class="w-full text-left text-sm">
            <thead>
                <tr class="text-gray-500 uppercase text-[10px] tracking-widest">
                    <th class="py-2">{"Month"}</th>
                    <th class="py-2 text-right">{"Income"}</th>
                    <th class="py-2 text-right">{"Expenses"}</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-100">
                { for stats.iter().map(|stat| html! {
                    <tr key={stat.month.clone()}>
                        <td class="py-2 text-gray-700">{ stat.month.clone() }</td>
                        <td class="py-2 text-right text-green-600">{ money(stat.income, services) }</td>
                        <td class="py-2 text-right text-red-500">{ money(stat.expenses, services) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

fn payment_list(
    snapshot: &DashboardSnapshot,
    services: &Services,
    on_mark_paid: Callback<String>,
) -> Html {
    if snapshot.payments.is_empty() {
        return html! { <p class="text-gray-500">{"No upcoming payments"}</p> };
    }
    html! {
        <ul class="space-y-4">
            { for snapshot.payments.iter().map(|payment| {
                let id = payment.id.clone();
                let pending = snapshot.is_pending(&payment.id);
                let on_mark_paid = on_mark_paid.clone();
                html! {
                    <li key={payment.id.clone()} class="flex flex-col md:flex-row items-center justify-between p-4 bg-gray-100 rounded-lg shadow-sm">
                        <div class="flex flex-col md:flex-row items-start md:items-center space-y-2 md:space-y-0 md:space-x-4 w-full md:w-auto">
                            <div class="flex items-center space-x-2 text-gray-600 text-sm">
                                { icon_calendar(18) }
                                <span>{ format_due_date(payment.due_date) }</span>
                            </div>
                            <span class="text-gray-900 font-medium truncate">{ payment.title.clone() }</span>
                        </div>
                        <div class="mt-2 md:mt-0 flex items-center space-x-4 w-full md:w-auto justify-between md:justify-end">
                            <span class="text-red-500 font-semibold">{ money(payment.amount, services) }</span>
                            <button
                                class="px-3 py-1 bg-green-500 text-white rounded-md shadow hover:bg-green-600 transition-all flex items-center space-x-1 disabled:opacity-50"
                                disabled={pending}
                                onclick={Callback::from(move |_: MouseEvent| on_mark_paid.emit(id.clone()))}
                            >
                                { icon_check(18) }
                                <span>{ if pending { "Saving..." } else { "Paid" } }</span>
                            </button>
                        </div>
                    </li>
                }
            }) }
        </ul>
    }
}
