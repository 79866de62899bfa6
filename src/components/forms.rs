use chrono::NaiveDate;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::Services;
use crate::api::{PaymentsApi, TransactionsApi};
use crate::models::{NewPayment, NewTransaction, TransactionType, UpcomingPayment};
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please complete all fields.")]
    MissingFields,
    #[error("Amount must be a positive whole number.")]
    InvalidAmount,
    #[error("Please pick a valid date.")]
    InvalidDate,
}

fn parse_amount(raw: &str) -> Result<u64, FormError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '.' && *c != ',').collect();
    match cleaned.parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(FormError::InvalidAmount),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate)
}

pub fn validate_transaction(
    kind: TransactionType,
    amount: &str,
    category: &str,
    date: &str,
    description: &str,
) -> Result<NewTransaction, FormError> {
    if [amount, category, date, description]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(FormError::MissingFields);
    }
    Ok(NewTransaction {
        kind,
        amount: parse_amount(amount)?,
        category: category.trim().to_string(),
        date: parse_date(date)?,
        description: description.trim().to_string(),
    })
}

pub fn validate_payment(title: &str, amount: &str, due_date: &str) -> Result<NewPayment, FormError> {
    if [title, amount, due_date].iter().any(|field| field.trim().is_empty()) {
        return Err(FormError::MissingFields);
    }
    Ok(NewPayment {
        title: title.trim().to_string(),
        amount: parse_amount(amount)?,
        due_date: parse_date(due_date)?,
    })
}

fn input_setter(handle: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

const INPUT_CLASS: &str = "w-full p-2 border border-gray-300 rounded-md";
const SUBMIT_CLASS: &str = "w-full px-4 py-2 bg-[#2563EB] text-white rounded-md shadow hover:bg-[#1E40AF] transition-all disabled:opacity-50";

#[derive(Properties, PartialEq)]
pub struct AddTransactionFormProps {
    pub services: Services,
    pub on_saved: Callback<()>,
}

#[function_component(AddTransactionForm)]
pub fn add_transaction_form(props: &AddTransactionFormProps) -> Html {
    let kind = use_state(|| TransactionType::Expense);
    let amount = use_state(String::new);
    let category = use_state(String::new);
    let date = use_state(String::new);
    let description = use_state(String::new);
    let saving = use_state(|| false);

    let on_kind = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                kind.set(if select.value() == "income" {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                });
            }
        })
    };

    let on_submit = {
        let services = props.services.clone();
        let on_saved = props.on_saved.clone();
        let (kind, amount, category, date, description, saving) = (
            kind.clone(),
            amount.clone(),
            category.clone(),
            date.clone(),
            description.clone(),
            saving.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let transaction =
                match validate_transaction(*kind, &amount, &category, &date, &description) {
                    Ok(transaction) => transaction,
                    Err(error) => {
                        services.toasts.error(&error.to_string());
                        return;
                    }
                };

            saving.set(true);
            let services = services.clone();
            let on_saved = on_saved.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match services.api.create_transaction(&transaction).await {
                    Ok(()) => {
                        log::info!("Transaction recorded: {} {:?}", transaction.amount, transaction.kind);
                        services.toasts.success("Transaction added");
                        on_saved.emit(());
                    }
                    Err(error) => {
                        log::error!("Error adding transaction: {}", error);
                        services.toasts.error("Failed to add transaction");
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <form class="space-y-4" onsubmit={on_submit}>
            <select class={INPUT_CLASS} onchange={on_kind}>
                <option value="expense" selected={*kind == TransactionType::Expense}>{"Expense"}</option>
                <option value="income" selected={*kind == TransactionType::Income}>{"Income"}</option>
            </select>
            <input class={INPUT_CLASS} placeholder="Amount" inputmode="numeric" value={(*amount).clone()} oninput={input_setter(amount.clone())} />
            <input class={INPUT_CLASS} placeholder="Category" value={(*category).clone()} oninput={input_setter(category.clone())} />
            <input class={INPUT_CLASS} type="date" value={(*date).clone()} oninput={input_setter(date.clone())} />
            <input class={INPUT_CLASS} placeholder="Description" value={(*description).clone()} oninput={input_setter(description.clone())} />
            <button class={SUBMIT_CLASS} type="submit" disabled={*saving}>
                { if *saving { "Saving..." } else { "Add Transaction" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct AddPaymentFormProps {
    pub services: Services,
    pub on_created: Callback<UpcomingPayment>,
}

#[function_component(AddPaymentForm)]
pub fn add_payment_form(props: &AddPaymentFormProps) -> Html {
    let title = use_state(String::new);
    let amount = use_state(String::new);
    let due_date = use_state(String::new);
    let saving = use_state(|| false);

    let on_submit = {
        let services = props.services.clone();
        let on_created = props.on_created.clone();
        let (title, amount, due_date, saving) =
            (title.clone(), amount.clone(), due_date.clone(), saving.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let payment = match validate_payment(&title, &amount, &due_date) {
                Ok(payment) => payment,
                Err(error) => {
                    services.toasts.error(&error.to_string());
                    return;
                }
            };

            saving.set(true);
            let services = services.clone();
            let on_created = on_created.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match services.api.create_payment(&payment).await {
                    Ok(created) => {
                        log::info!("Upcoming payment created: {}", created.id);
                        services.toasts.success("Upcoming payment added");
                        on_created.emit(created);
                    }
                    Err(error) => {
                        log::error!("Error adding upcoming payment: {}", error);
                        services.toasts.error("Failed to add upcoming payment");
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <form class="space-y-4" onsubmit={on_submit}>
            <input class={INPUT_CLASS} placeholder="Title" value={(*title).clone()} oninput={input_setter(title.clone())} />
            <input class={INPUT_CLASS} placeholder="Amount" inputmode="numeric" value={(*amount).clone()} oninput={input_setter(amount.clone())} />
            <input class={INPUT_CLASS} type="date" value={(*due_date).clone()} oninput={input_setter(due_date.clone())} />
            <button class={SUBMIT_CLASS} type="submit" disabled={*saving}>
                { if *saving { "Saving..." } else { "Add Payment" } }
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_requires_every_field() {
        let error = validate_transaction(TransactionType::Income, "1000", "", "2024-05-01", "Salary")
            .expect_err("category missing");
        assert_eq!(error, FormError::MissingFields);
    }

    #[test]
    fn transaction_amount_accepts_grouping() {
        let tx = validate_transaction(
            TransactionType::Income,
            "1.500.000",
            " Salary ",
            "2024-05-01",
            "May salary",
        )
        .expect("valid transaction");
        assert_eq!(tx.amount, 1_500_000);
        assert_eq!(tx.category, "Salary");
    }

    #[test]
    fn zero_or_negative_amounts_are_rejected() {
        assert_eq!(
            validate_payment("Rent", "0", "2024-05-01"),
            Err(FormError::InvalidAmount)
        );
        assert_eq!(
            validate_payment("Rent", "-10", "2024-05-01"),
            Err(FormError::InvalidAmount)
        );
    }

    #[test]
    fn payment_due_date_must_parse() {
        assert_eq!(
            validate_payment("Rent", "1500000", "01/05/2024"),
            Err(FormError::InvalidDate)
        );
        let payment = validate_payment("Rent", "1500000", "2024-05-01").expect("valid payment");
        assert_eq!(payment.due_date, NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"));
    }
}
