mod api;
mod chart;
mod dates;
mod filters;
mod modal;
mod models;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use filters::{FilterState, MONTHS};
use modal::{use_modal, ModalPhase};
use models::{
    format_amount, Budget, BudgetLevel, Profile, Totals, Transaction, TransactionPatch, TxnKind,
};

const CATEGORIES: [&str; 7] = [
    "Food",
    "Travel",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

fn bind_input(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn bind_select(state: UseStateHandle<String>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value());
    })
}

fn kind_from_form(value: &str) -> TxnKind {
    if value == "Credit" {
        TxnKind::Credit
    } else {
        TxnKind::Debit
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Issues a filtered expense load carrying a monotonic ticket; the
/// response is dropped when a newer load started after it, so a slow
/// reply never overwrites fresher data.
fn load_expenses(
    filter: FilterState,
    expenses: UseStateHandle<Vec<Transaction>>,
    seq: Rc<RefCell<u64>>,
) {
    let ticket = {
        let mut counter = seq.borrow_mut();
        *counter += 1;
        *counter
    };
    spawn_local(async move {
        let query = filter.query(js_sys::Date::now() as u64);
        match api::fetch_expenses(&query).await {
            Ok(list) => {
                if *seq.borrow() == ticket {
                    expenses.set(list);
                }
            }
            Err(err) => gloo_console::error!(format!("loading expenses failed: {err}")),
        }
    });
}

fn load_budgets(budgets: UseStateHandle<Vec<Budget>>) {
    spawn_local(async move {
        match api::fetch_budgets().await {
            Ok(list) => budgets.set(list),
            Err(err) => gloo_console::error!(format!("loading budgets failed: {err}")),
        }
    });
}

#[derive(Properties, PartialEq)]
struct KpiCardProps {
    title: &'static str,
    value: String,
    accent: &'static str,
}

#[function_component(KpiCard)]
fn kpi_card(props: &KpiCardProps) -> Html {
    html! {
        <div class="bg-white p-6 rounded-2xl shadow-sm border border-slate-100">
            <p class="text-slate-400 text-[10px] font-bold mb-1 uppercase tracking-widest">{ props.title }</p>
            <h3 class={classes!("text-2xl", "font-bold", "tracking-tight", props.accent)}>{ props.value.clone() }</h3>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseTableProps {
    transactions: Vec<Transaction>,
    on_edit: Callback<i64>,
    on_delete: Callback<i64>,
}

#[function_component(ExpenseTable)]
fn expense_table(props: &ExpenseTableProps) -> Html {
    html! {
        <div class="overflow-x-auto">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-slate-50 text-slate-400 text-[10px] uppercase tracking-widest">
                        <th class="p-4 pl-6 font-bold">{"Date"}</th>
                        <th class="p-4 font-bold">{"Merchant"}</th>
                        <th class="p-4 font-bold">{"Amount"}</th>
                        <th class="p-4 pr-6 font-bold text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { if props.transactions.is_empty() {
                        html! {
                            <tr><td colspan="4" class="p-6 text-center text-slate-400">
                                {"No transactions found matching your filters."}
                            </td></tr>
                        }
                    } else {
                        html! {
                            <>
                            { for props.transactions.iter().map(|tx| {
                                let (sign, color) = match tx.kind {
                                    TxnKind::Credit => ("+", "text-emerald-500"),
                                    TxnKind::Debit => ("-", "text-rose-500"),
                                };
                                let actions = if let Some(id) = tx.id {
                                    let on_edit = props.on_edit.clone();
                                    let on_delete = props.on_delete.clone();
                                    html! {
                                        <>
                                            <button onclick={Callback::from(move |_| on_edit.emit(id))}
                                                class="text-amber-500 hover:bg-amber-50 p-2 rounded-lg transition mr-1">{"✎"}</button>
                                            <button onclick={Callback::from(move |_| on_delete.emit(id))}
                                                class="text-rose-500 hover:bg-rose-50 p-2 rounded-lg transition">{"🗑"}</button>
                                        </>
                                    }
                                } else {
                                    html! {}
                                };
                                html! {
                                    <tr class="hover:bg-slate-50 transition group border-b border-slate-50 last:border-none text-sm">
                                        <td class="p-4 pl-6 text-slate-500">{ tx.date.clone() }</td>
                                        <td class="p-4">
                                            <div class="font-bold text-slate-700">{ tx.merchant.clone() }</div>
                                            <div class="text-xs text-slate-400 mt-0.5 flex gap-2">
                                                <span class="bg-slate-100 px-2 py-0.5 rounded text-slate-500">{ tx.category.clone() }</span>
                                                <span class="text-indigo-400">{ tx.payment_mode.clone() }</span>
                                            </div>
                                        </td>
                                        <td class={classes!("p-4", "font-bold", color)}>{ format!("{} ₹{}", sign, tx.amount) }</td>
                                        <td class="p-4 pr-6 text-right opacity-0 group-hover:opacity-100 transition-opacity duration-200">
                                            { actions }
                                        </td>
                                    </tr>
                                }
                            }) }
                            </>
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SpendingChartProps {
    transactions: Vec<Transaction>,
    checked_months: usize,
}

#[function_component(SpendingChart)]
fn spending_chart(props: &SpendingChartProps) -> Html {
    let view = chart::choose_view(&props.transactions, props.checked_months);
    let series = chart::spending_series(&props.transactions, view);
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let points = chart::point_positions(&values);
    let line = chart::polyline_points(&points);
    let area = chart::area_points(&points);

    html! {
        <div class="bg-white rounded-2xl shadow-sm border border-slate-100 p-6 lg:col-span-2">
            <div class="flex items-center justify-between mb-4">
                <h3 class="font-bold text-slate-700 text-lg">{"Spending Trend"}</h3>
                <span class="text-[10px] text-slate-400 font-bold uppercase tracking-widest">{ view.series_label() }</span>
            </div>
            { if series.is_empty() {
                html! { <p class="text-sm text-slate-400 text-center py-12">{"No spending in this range."}</p> }
            } else {
                html! {
                    <>
                        <svg viewBox={format!("0 0 {} {}", chart::VIEW_W, chart::VIEW_H)} preserveAspectRatio="none" class="w-full h-56">
                            <defs>
                                <linearGradient id="spend-fill" x1="0" y1="0" x2="0" y2="1">
                                    <stop offset="0%" stop-color="rgba(99, 102, 241, 0.5)" />
                                    <stop offset="100%" stop-color="rgba(99, 102, 241, 0.0)" />
                                </linearGradient>
                            </defs>
                            <polygon points={area} fill="url(#spend-fill)" />
                            <polyline points={line} fill="none" stroke="#6366f1" stroke-width="3"
                                stroke-linecap="round" stroke-linejoin="round" />
                            { for points.iter().map(|(x, y)| html! {
                                <circle cx={format!("{:.1}", x)} cy={format!("{:.1}", y)} r="4"
                                    fill="#fff" stroke="#6366f1" stroke-width="2" />
                            }) }
                        </svg>
                        <div class="flex justify-between mt-2 text-[10px] text-slate-400 font-bold">
                            { for series.iter().map(|(label, _)| html! { <span>{ label.clone() }</span> }) }
                        </div>
                    </>
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BudgetPanelProps {
    budgets: Vec<Budget>,
    on_new: Callback<MouseEvent>,
    on_edit: Callback<Budget>,
    on_delete: Callback<i64>,
}

#[function_component(BudgetPanel)]
fn budget_panel(props: &BudgetPanelProps) -> Html {
    html! {
        <div class="bg-white rounded-2xl shadow-sm border border-slate-100 p-6">
            <div class="flex items-center justify-between mb-4">
                <h3 class="font-bold text-slate-700 text-lg">{"Budgets 🎯"}</h3>
                <button onclick={props.on_new.clone()}
                    class="text-xs font-bold text-indigo-500 hover:bg-indigo-50 px-3 py-1.5 rounded-lg transition">
                    {"+ New"}
                </button>
            </div>
            <div class="space-y-4">
                { if props.budgets.is_empty() {
                    html! { <p class="text-slate-400 text-sm text-center">{"No budgets set. Create one for a trip or a month!"}</p> }
                } else {
                    html! {
                        <>
                        { for props.budgets.iter().map(|b| {
                            let bar = BudgetLevel::for_percentage(b.percentage).bar_class();
                            let width = format!("width: {:.0}%", b.percentage.min(100.0));
                            let on_edit = {
                                let on_edit = props.on_edit.clone();
                                let budget = b.clone();
                                Callback::from(move |_| on_edit.emit(budget.clone()))
                            };
                            let on_delete = {
                                let on_delete = props.on_delete.clone();
                                let id = b.id;
                                Callback::from(move |_| on_delete.emit(id))
                            };
                            html! {
                                <div class="group">
                                    <div class="flex justify-between text-sm mb-1">
                                        <div class="flex flex-col">
                                            <span class="font-bold text-slate-700">{ b.category.clone() }</span>
                                            <span class="text-[10px] text-slate-400 font-medium">{ dates::short_range(&b.start_date, &b.end_date) }</span>
                                        </div>
                                        <div class="flex items-center gap-2">
                                            <span class="text-slate-500 text-xs">{ format!("₹{} / ₹{}", b.spent, b.limit) }</span>
                                            <button onclick={on_edit} class="text-xs text-indigo-500 hover:bg-indigo-50 p-1 rounded">{"✎"}</button>
                                            <button onclick={on_delete} class="text-xs text-rose-500 hover:bg-rose-50 p-1 rounded">{"✕"}</button>
                                        </div>
                                    </div>
                                    <div class="w-full bg-slate-100 rounded-full h-2.5 overflow-hidden">
                                        <div class={classes!(bar, "h-2.5", "rounded-full", "transition-all", "duration-1000")} style={width}></div>
                                    </div>
                                </div>
                            }
                        }) }
                        </>
                    }
                }}
            </div>
        </div>
    }
}

#[derive(Clone, PartialEq)]
struct ChatMessage {
    from_user: bool,
    text: String,
}

#[function_component(ChatWidget)]
fn chat_widget() -> Html {
    let open = use_state(|| false);
    let messages = use_state(Vec::<ChatMessage>::new);
    let draft = use_state(String::new);
    let busy = use_state(|| false);
    let list_ref = use_node_ref();

    {
        let list_ref = list_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(el) = list_ref.cast::<web_sys::Element>() {
                    el.set_scroll_top(el.scroll_height());
                }
                || ()
            },
            messages.len(),
        );
    }

    let send = {
        let messages = messages.clone();
        let draft = draft.clone();
        let busy = busy.clone();
        Callback::from(move |_: ()| {
            if *busy {
                return;
            }
            let text = draft.trim().to_string();
            if text.is_empty() {
                return;
            }
            draft.set(String::new());
            let mut log = (*messages).clone();
            log.push(ChatMessage {
                from_user: true,
                text: text.clone(),
            });
            messages.set(log.clone());
            busy.set(true);

            let messages = messages.clone();
            let busy = busy.clone();
            spawn_local(async move {
                match api::send_chat(&text).await {
                    Ok(reply) => {
                        log.push(ChatMessage {
                            from_user: false,
                            text: reply.response,
                        });
                        messages.set(log);
                    }
                    Err(err) => gloo_console::error!(format!("chat request failed: {err}")),
                }
                busy.set(false);
            });
        })
    };

    let on_toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let on_send_click = {
        let send = send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };
    let on_key = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };

    html! {
        <div class="fixed bottom-6 right-6 z-40 flex flex-col items-end gap-3">
            { if *open {
                html! {
                    <div class="w-80 bg-white border border-slate-200 rounded-2xl shadow-xl overflow-hidden flex flex-col">
                        <div class="px-4 py-3 bg-indigo-600 text-white text-sm font-bold">{"Money Assistant"}</div>
                        <div ref={list_ref.clone()} class="flex flex-col gap-2 p-3 h-72 overflow-y-auto bg-slate-50">
                            { for messages.iter().map(|m| {
                                let class = if m.from_user {
                                    "bg-indigo-600 text-white p-3 rounded-2xl rounded-br-none self-end max-w-xs text-sm shadow-md"
                                } else {
                                    "bg-white border border-slate-200 text-slate-700 p-3 rounded-2xl rounded-bl-none self-start max-w-xs text-sm shadow-sm"
                                };
                                html! { <div class={class}>{ m.text.clone() }</div> }
                            }) }
                        </div>
                        <div class="flex gap-2 p-3 border-t border-slate-100">
                            <input value={(*draft).clone()} oninput={bind_input(draft.clone())} onkeypress={on_key}
                                placeholder="Ask about your spending..."
                                class="flex-1 bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                            <button onclick={on_send_click} disabled={*busy}
                                class="bg-indigo-600 text-white px-4 rounded-xl text-sm font-bold disabled:opacity-50">
                                {"Send"}
                            </button>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}
            <button onclick={on_toggle}
                class="w-14 h-14 bg-indigo-600 text-white rounded-full shadow-lg text-2xl hover:scale-105 transition-transform">
                {"💬"}
            </button>
        </div>
    }
}

fn modal_shell(phase: ModalPhase, title: String, on_close: Callback<MouseEvent>, body: Html) -> Html {
    if !phase.is_mounted() {
        return html! {};
    }
    html! {
        <div class={classes!("fixed", "inset-0", "z-50", "flex", "items-center", "justify-center",
                             "bg-slate-900/40", "transition-opacity", "duration-300", phase.overlay_class())}>
            <div class={classes!("bg-white", "rounded-2xl", "shadow-xl", "w-full", "max-w-md", "p-6",
                                 "transform", "transition-transform", "duration-300", phase.panel_class())}>
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-lg font-bold text-slate-700">{ title }</h3>
                    <button onclick={on_close} class="text-slate-400 hover:text-slate-600">{"✕"}</button>
                </div>
                { body }
            </div>
        </div>
    }
}

fn field_label(text: &'static str) -> Html {
    html! { <label class="text-[10px] font-bold text-slate-400 uppercase tracking-widest">{ text }</label> }
}

fn category_options() -> Html {
    html! { <>{ for CATEGORIES.iter().map(|c| html! { <option value={*c}>{ *c }</option> }) }</> }
}

#[function_component(DashboardPage)]
fn dashboard_page() -> Html {
    let expenses = use_state(Vec::<Transaction>::new);
    let budgets = use_state(Vec::<Budget>::new);
    let filter = use_state(FilterState::default);
    let seq = use_mut_ref(|| 0u64);
    let menu_open = use_state(|| false);

    // manual entry form
    let f_date = use_state(|| dates::iso(dates::today()));
    let f_merchant = use_state(String::new);
    let f_amount = use_state(String::new);
    let f_category = use_state(|| "Food".to_string());
    let f_kind = use_state(|| "Debit".to_string());
    let f_payment = use_state(|| "Cash".to_string());
    let f_error = use_state(|| None::<String>);
    let f_saving = use_state(|| false);

    // receipt upload and verification modal
    let file_input = use_node_ref();
    let scan_status = use_state(String::new);
    let verify = use_modal();
    let v_preview = use_state(String::new);
    let v_merchant = use_state(String::new);
    let v_date = use_state(String::new);
    let v_amount = use_state(String::new);
    let v_category = use_state(|| "Food".to_string());
    let v_hash = use_state(String::new);
    let v_flagged = use_state(|| "0".to_string());

    // edit modal
    let edit = use_modal();
    let e_id = use_state(|| None::<i64>);
    let e_date = use_state(String::new);
    let e_merchant = use_state(String::new);
    let e_amount = use_state(String::new);
    let e_category = use_state(|| "Food".to_string());
    let e_kind = use_state(|| "Debit".to_string());

    // budget modal
    let budget_modal = use_modal();
    let b_id = use_state(|| None::<i64>);
    let b_category = use_state(|| "Food".to_string());
    let b_amount = use_state(String::new);
    let b_start = use_state(String::new);
    let b_end = use_state(String::new);

    // profile modal
    let profile_modal = use_modal();
    let p_name = use_state(String::new);
    let p_age = use_state(String::new);
    let p_occupation = use_state(String::new);
    let p_role = use_state(String::new);

    {
        let filter = filter.clone();
        let expenses = expenses.clone();
        let budgets = budgets.clone();
        let seq = seq.clone();
        use_effect_with_deps(
            move |_| {
                load_expenses((*filter).clone(), expenses, seq);
                load_budgets(budgets);
                || ()
            },
            (),
        );
    }

    let totals = Totals::of(&expenses);

    // filter controls

    let on_menu_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let on_select_all = {
        let filter = filter.clone();
        let expenses = expenses.clone();
        let seq = seq.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.set_all(input.checked());
            filter.set(next.clone());
            load_expenses(next, expenses.clone(), seq.clone());
        })
    };

    let on_search_input = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.search = input.value();
            filter.set(next);
        })
    };

    let on_search_key = {
        let filter = filter.clone();
        let expenses = expenses.clone();
        let seq = seq.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*filter).clone();
                next.search = input.value();
                filter.set(next.clone());
                load_expenses(next, expenses.clone(), seq.clone());
            }
        })
    };

    // manual entry

    let on_submit_expense = {
        let f_date = f_date.clone();
        let f_merchant = f_merchant.clone();
        let f_amount = f_amount.clone();
        let f_category = f_category.clone();
        let f_kind = f_kind.clone();
        let f_payment = f_payment.clone();
        let f_error = f_error.clone();
        let f_saving = f_saving.clone();
        let filter = filter.clone();
        let expenses = expenses.clone();
        let budgets = budgets.clone();
        let seq = seq.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let date_val = f_date.trim().to_string();
            let merchant_val = f_merchant.trim().to_string();
            let amount_val = f_amount.trim().to_string();
            if date_val.is_empty() || merchant_val.is_empty() || amount_val.is_empty() {
                f_error.set(Some("Please complete all fields.".to_string()));
                return;
            }
            let Ok(amount) = amount_val.parse::<f64>() else {
                f_error.set(Some("Amount must be a number.".to_string()));
                return;
            };
            f_error.set(None);
            f_saving.set(true);

            let tx = Transaction {
                id: None,
                date: date_val,
                merchant: merchant_val,
                amount,
                category: (*f_category).clone(),
                payment_mode: (*f_payment).clone(),
                kind: kind_from_form(&f_kind),
                source: "manual".to_string(),
                image_hash: None,
                is_flagged: None,
            };

            let f_date = f_date.clone();
            let f_merchant = f_merchant.clone();
            let f_amount = f_amount.clone();
            let f_saving = f_saving.clone();
            let filter = filter.clone();
            let expenses = expenses.clone();
            let budgets = budgets.clone();
            let seq = seq.clone();
            spawn_local(async move {
                match api::create_expense(&tx).await {
                    Ok(()) => {
                        f_merchant.set(String::new());
                        f_amount.set(String::new());
                        f_date.set(dates::iso(dates::today()));
                        load_expenses((*filter).clone(), expenses, seq);
                        load_budgets(budgets);
                    }
                    Err(err) => gloo_console::error!(format!("saving expense failed: {err}")),
                }
                f_saving.set(false);
            });
        })
    };

    // receipt upload

    let on_upload = {
        let file_input = file_input.clone();
        let scan_status = scan_status.clone();
        let verify = verify.clone();
        let v_preview = v_preview.clone();
        let v_merchant = v_merchant.clone();
        let v_date = v_date.clone();
        let v_amount = v_amount.clone();
        let v_category = v_category.clone();
        let v_hash = v_hash.clone();
        let v_flagged = v_flagged.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(input) = file_input.cast::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let Ok(form) = web_sys::FormData::new() else {
                return;
            };
            if form.append_with_blob("file", &file).is_err() {
                return;
            }
            scan_status.set("🤖 AI Analyzing...".to_string());

            let scan_status = scan_status.clone();
            let verify = verify.clone();
            let v_preview = v_preview.clone();
            let v_merchant = v_merchant.clone();
            let v_date = v_date.clone();
            let v_amount = v_amount.clone();
            let v_category = v_category.clone();
            let v_hash = v_hash.clone();
            let v_flagged = v_flagged.clone();
            spawn_local(async move {
                match api::upload_receipt(form).await {
                    Ok(receipt) => {
                        v_preview.set(receipt.image_url);
                        v_merchant.set(receipt.merchant);
                        v_date.set(receipt.date);
                        v_amount.set(receipt.amount.to_string());
                        v_category.set(receipt.category);
                        v_hash.set(receipt.image_hash);
                        v_flagged.set(receipt.is_flagged.to_string());
                        scan_status.set(String::new());
                        verify.open();
                    }
                    Err(err) => {
                        scan_status.set(String::new());
                        gloo_console::error!(format!("receipt upload failed: {err}"));
                    }
                }
            });
        })
    };

    let on_save_verified = {
        let verify = verify.clone();
        let v_merchant = v_merchant.clone();
        let v_date = v_date.clone();
        let v_amount = v_amount.clone();
        let v_category = v_category.clone();
        let v_hash = v_hash.clone();
        let v_flagged = v_flagged.clone();
        let filter = filter.clone();
        let expenses = expenses.clone();
        let budgets = budgets.clone();
        let seq = seq.clone();
        Callback::from(move |_: MouseEvent| {
            let tx = Transaction {
                id: None,
                date: (*v_date).clone(),
                merchant: (*v_merchant).clone(),
                amount: v_amount.parse::<f64>().unwrap_or(0.0),
                category: (*v_category).clone(),
                payment_mode: "Cash".to_string(),
                kind: TxnKind::Debit,
                source: "scanned".to_string(),
                image_hash: Some((*v_hash).clone()),
                is_flagged: Some(v_flagged.parse::<i64>().unwrap_or(0)),
            };
            let verify = verify.clone();
            let filter = filter.clone();
            let expenses = expenses.clone();
            let budgets = budgets.clone();
            let seq = seq.clone();
            spawn_local(async move {
                if let Err(err) = api::create_expense(&tx).await {
                    gloo_console::error!(format!("saving scanned expense failed: {err}"));
                }
                verify.close();
                load_expenses((*filter).clone(), expenses, seq);
                load_budgets(budgets);
            });
        })
    };

    // edit and delete

    let on_edit_expense = {
        let expenses = expenses.clone();
        let edit = edit.clone();
        let e_id = e_id.clone();
        let e_date = e_date.clone();
        let e_merchant = e_merchant.clone();
        let e_amount = e_amount.clone();
        let e_category = e_category.clone();
        let e_kind = e_kind.clone();
        Callback::from(move |id: i64| {
            // lookup goes against the loaded list only; a miss is a no-op
            let Some(tx) = expenses.iter().find(|tx| tx.id == Some(id)).cloned() else {
                return;
            };
            e_id.set(Some(id));
            e_date.set(tx.date);
            e_merchant.set(tx.merchant);
            e_amount.set(tx.amount.to_string());
            e_category.set(tx.category);
            e_kind.set(
                match tx.kind {
                    TxnKind::Credit => "Credit",
                    TxnKind::Debit => "Debit",
                }
                .to_string(),
            );
            edit.open();
        })
    };

    let on_save_edit = {
        let edit = edit.clone();
        let e_id = e_id.clone();
        let e_date = e_date.clone();
        let e_merchant = e_merchant.clone();
        let e_amount = e_amount.clone();
        let e_category = e_category.clone();
        let e_kind = e_kind.clone();
        let filter = filter.clone();
        let expenses = expenses.clone();
        let budgets = budgets.clone();
        let seq = seq.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = *e_id else {
                return;
            };
            let patch = TransactionPatch {
                date: (*e_date).clone(),
                merchant: (*e_merchant).clone(),
                amount: e_amount.parse::<f64>().unwrap_or(0.0),
                category: (*e_category).clone(),
                kind: kind_from_form(&e_kind),
            };
            let edit = edit.clone();
            let filter = filter.clone();
            let expenses = expenses.clone();
            let budgets = budgets.clone();
            let seq = seq.clone();
            spawn_local(async move {
                if let Err(err) = api::update_expense(id, &patch).await {
                    gloo_console::error!(format!("updating expense failed: {err}"));
                }
                edit.close();
                load_expenses((*filter).clone(), expenses, seq);
                load_budgets(budgets);
            });
        })
    };

    let on_delete_expense = {
        let filter = filter.clone();
        let expenses = expenses.clone();
        let budgets = budgets.clone();
        let seq = seq.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure?") {
                return;
            }
            let filter = filter.clone();
            let expenses = expenses.clone();
            let budgets = budgets.clone();
            let seq = seq.clone();
            spawn_local(async move {
                if let Err(err) = api::delete_expense(id).await {
                    gloo_console::error!(format!("deleting expense failed: {err}"));
                }
                load_expenses((*filter).clone(), expenses, seq);
                load_budgets(budgets);
            });
        })
    };

    // budgets

    let on_new_budget = {
        let budget_modal = budget_modal.clone();
        let b_id = b_id.clone();
        let b_amount = b_amount.clone();
        let b_start = b_start.clone();
        let b_end = b_end.clone();
        Callback::from(move |_: MouseEvent| {
            let today = dates::today();
            b_id.set(None);
            b_amount.set(String::new());
            b_start.set(dates::iso(today));
            b_end.set(dates::iso(dates::last_day_of_month(today)));
            budget_modal.open();
        })
    };

    let on_edit_budget = {
        let budget_modal = budget_modal.clone();
        let b_id = b_id.clone();
        let b_category = b_category.clone();
        let b_amount = b_amount.clone();
        let b_start = b_start.clone();
        let b_end = b_end.clone();
        Callback::from(move |b: Budget| {
            b_id.set(Some(b.id));
            b_category.set(b.category);
            b_amount.set(b.limit.to_string());
            b_start.set(b.start_date);
            b_end.set(b.end_date);
            budget_modal.open();
        })
    };

    let on_save_budget = {
        let budget_modal = budget_modal.clone();
        let b_id = b_id.clone();
        let b_category = b_category.clone();
        let b_amount = b_amount.clone();
        let b_start = b_start.clone();
        let b_end = b_end.clone();
        let budgets = budgets.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(payload) = models::budget_payload(&b_category, &b_amount, &b_start, &b_end)
            else {
                alert("Please fill all fields");
                return;
            };
            let id = *b_id;
            let budget_modal = budget_modal.clone();
            let budgets = budgets.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => api::update_budget(id, &payload).await,
                    None => api::create_budget(&payload).await,
                };
                if let Err(err) = result {
                    gloo_console::error!(format!("saving budget failed: {err}"));
                }
                budget_modal.close();
                load_budgets(budgets);
            });
        })
    };

    let on_delete_budget = {
        let budgets = budgets.clone();
        Callback::from(move |id: i64| {
            if !confirm("Delete this budget?") {
                return;
            }
            let budgets = budgets.clone();
            spawn_local(async move {
                if let Err(err) = api::delete_budget(id).await {
                    gloo_console::error!(format!("deleting budget failed: {err}"));
                }
                load_budgets(budgets);
            });
        })
    };

    // profile

    let on_open_profile = {
        let profile_modal = profile_modal.clone();
        Callback::from(move |_: MouseEvent| profile_modal.open())
    };

    let on_save_profile = {
        let p_name = p_name.clone();
        let p_age = p_age.clone();
        let p_occupation = p_occupation.clone();
        let p_role = p_role.clone();
        Callback::from(move |_: MouseEvent| {
            let profile = Profile {
                name: (*p_name).clone(),
                age: (*p_age).clone(),
                occupation: (*p_occupation).clone(),
                role: (*p_role).clone(),
            };
            spawn_local(async move {
                match api::update_profile(&profile).await {
                    Ok(true) => {
                        alert("Profile Updated Successfully!");
                        if let Some(w) = web_sys::window() {
                            let _ = w.location().reload();
                        }
                    }
                    Ok(false) => gloo_console::error!("profile update rejected"),
                    Err(err) => gloo_console::error!(format!("profile update failed: {err}")),
                }
            });
        })
    };

    let close_verify = {
        let verify = verify.clone();
        Callback::from(move |_: MouseEvent| verify.close())
    };
    let close_edit = {
        let edit = edit.clone();
        Callback::from(move |_: MouseEvent| edit.close())
    };
    let close_budget = {
        let budget_modal = budget_modal.clone();
        Callback::from(move |_: MouseEvent| budget_modal.close())
    };
    let close_profile = {
        let profile_modal = profile_modal.clone();
        Callback::from(move |_: MouseEvent| profile_modal.close())
    };

    let flagged = v_flagged.parse::<i64>().unwrap_or(0) != 0;

    html! {
        <div class="min-h-screen bg-slate-100 text-slate-800">
            <header class="bg-white border-b border-slate-200 h-16 flex items-center justify-between px-6">
                <h1 class="text-xl font-black text-indigo-600 tracking-tight">{"SpendLens"}</h1>
                <div class="flex items-center gap-3">
                    <a href="/api/export" class="text-xs font-bold text-slate-500 hover:bg-slate-100 px-3 py-2 rounded-lg transition">{"⬇ Export"}</a>
                    <button onclick={on_open_profile} class="text-xs font-bold text-slate-500 hover:bg-slate-100 px-3 py-2 rounded-lg transition">{"👤 Profile"}</button>
                </div>
            </header>

            <main class="max-w-6xl mx-auto p-6 space-y-6">
                <div class="flex flex-wrap items-center gap-3">
                    <div class="relative">
                        <button onclick={on_menu_toggle}
                            class="bg-white border border-slate-200 rounded-xl px-4 py-2 text-sm font-bold text-slate-600 shadow-sm">
                            { format!("🗓️ {}", filter.label()) }
                        </button>
                        { if *menu_open {
                            html! {
                                <div class="absolute left-0 top-12 w-48 bg-white border border-slate-200 rounded-xl shadow-lg p-3 z-30 space-y-1">
                                    <label class="flex items-center gap-2 text-sm text-slate-600 font-bold border-b border-slate-100 pb-2">
                                        <input type="checkbox" checked={filter.all_selected()} onchange={on_select_all.clone()} />
                                        {"Select All"}
                                    </label>
                                    { for MONTHS.iter().map(|(code, name)| {
                                        let filter = filter.clone();
                                        let expenses = expenses.clone();
                                        let seq = seq.clone();
                                        let code = *code;
                                        let checked = filter.months.contains(code);
                                        let onchange = Callback::from(move |_: Event| {
                                            let mut next = (*filter).clone();
                                            next.toggle_month(code);
                                            filter.set(next.clone());
                                            load_expenses(next, expenses.clone(), seq.clone());
                                        });
                                        html! {
                                            <label class="flex items-center gap-2 text-sm text-slate-600">
                                                <input type="checkbox" checked={checked} onchange={onchange} />
                                                { *name }
                                            </label>
                                        }
                                    }) }
                                </div>
                            }
                        } else {
                            html! {}
                        }}
                    </div>
                    <input oninput={on_search_input} onkeypress={on_search_key}
                        placeholder="Search merchant or category, Enter to apply"
                        class="flex-1 min-w-[220px] bg-white border border-slate-200 rounded-xl px-4 py-2 text-sm shadow-sm outline-none focus:ring-2 focus:ring-indigo-200" />
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <KpiCard title="Income" value={format_amount(totals.income)} accent="text-emerald-500" />
                    <KpiCard title="Expense" value={format_amount(totals.expense)} accent="text-rose-500" />
                    <KpiCard title="Balance" value={format_amount(totals.balance())} accent="text-indigo-600" />
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 items-start">
                    <SpendingChart transactions={(*expenses).clone()} checked_months={filter.months.len()} />
                    <BudgetPanel budgets={(*budgets).clone()} on_new={on_new_budget}
                        on_edit={on_edit_budget} on_delete={on_delete_budget} />
                </div>

                <div class="bg-white rounded-2xl shadow-sm border border-slate-100 overflow-hidden">
                    <div class="p-5 border-b border-slate-100">
                        <h3 class="font-bold text-slate-700 text-lg">{"Transactions"}</h3>
                    </div>
                    <ExpenseTable transactions={(*expenses).clone()}
                        on_edit={on_edit_expense} on_delete={on_delete_expense} />
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 items-start">
                    <form onsubmit={on_submit_expense} class="bg-white rounded-2xl shadow-sm border border-slate-100 p-6 space-y-3">
                        <h3 class="font-bold text-slate-700 text-lg">{"Add Transaction"}</h3>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="space-y-1">
                                { field_label("Date") }
                                <input type="date" value={(*f_date).clone()} oninput={bind_input(f_date.clone())}
                                    class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                            </div>
                            <div class="space-y-1">
                                { field_label("Merchant") }
                                <input value={(*f_merchant).clone()} oninput={bind_input(f_merchant.clone())}
                                    placeholder="Where?" class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                            </div>
                            <div class="space-y-1">
                                { field_label("Amount (₹)") }
                                <input type="number" step="0.01" value={(*f_amount).clone()} oninput={bind_input(f_amount.clone())}
                                    placeholder="0.00" class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                            </div>
                            <div class="space-y-1">
                                { field_label("Category") }
                                <select value={(*f_category).clone()} onchange={bind_select(f_category.clone())}
                                    class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                                    { category_options() }
                                </select>
                            </div>
                            <div class="space-y-1">
                                { field_label("Type") }
                                <select value={(*f_kind).clone()} onchange={bind_select(f_kind.clone())}
                                    class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                                    <option value="Debit">{"Debit"}</option>
                                    <option value="Credit">{"Credit"}</option>
                                </select>
                            </div>
                            <div class="space-y-1">
                                { field_label("Payment Mode") }
                                <select value={(*f_payment).clone()} onchange={bind_select(f_payment.clone())}
                                    class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                                    <option value="Cash">{"Cash"}</option>
                                    <option value="Card">{"Card"}</option>
                                    <option value="UPI">{"UPI"}</option>
                                </select>
                            </div>
                        </div>
                        { if let Some(msg) = &*f_error {
                            html! { <p class="text-sm text-rose-500">{ msg.clone() }</p> }
                        } else {
                            html! {}
                        }}
                        <button type="submit" disabled={*f_saving}
                            class="w-full bg-indigo-600 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition disabled:opacity-50">
                            { if *f_saving { "Saving..." } else { "Add" } }
                        </button>
                    </form>

                    <div class="bg-white rounded-2xl shadow-sm border border-slate-100 p-6 space-y-3">
                        <h3 class="font-bold text-slate-700 text-lg">{"Scan a Receipt"}</h3>
                        <p class="text-sm text-slate-400">{"Upload a bill photo; the server extracts the fields and you confirm them before saving."}</p>
                        <input type="file" accept="image/*" ref={file_input.clone()}
                            class="w-full text-sm text-slate-500 file:bg-indigo-50 file:text-indigo-600 file:border-none file:rounded-lg file:px-4 file:py-2 file:font-bold file:mr-3" />
                        <button onclick={on_upload}
                            class="w-full bg-slate-800 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition">
                            {"Upload & Scan"}
                        </button>
                        { if !scan_status.is_empty() {
                            html! { <p class="text-sm text-indigo-500 font-bold">{ (*scan_status).clone() }</p> }
                        } else {
                            html! {}
                        }}
                    </div>
                </div>
            </main>

            <ChatWidget />

            { modal_shell(verify.phase(), "Verify Receipt".to_string(), close_verify, html! {
                <div class="space-y-3">
                    { if !v_preview.is_empty() {
                        html! { <img src={(*v_preview).clone()} alt="Receipt preview" class="w-full max-h-48 object-contain rounded-xl bg-slate-50" /> }
                    } else {
                        html! {}
                    }}
                    { if flagged {
                        html! { <p class="text-xs font-bold text-amber-600 bg-amber-50 rounded-lg px-3 py-2">{"⚠ This receipt was flagged as suspicious."}</p> }
                    } else {
                        html! {}
                    }}
                    <div class="space-y-1">
                        { field_label("Merchant") }
                        <input value={(*v_merchant).clone()} oninput={bind_input(v_merchant.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            { field_label("Date") }
                            <input type="date" value={(*v_date).clone()} oninput={bind_input(v_date.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                        <div class="space-y-1">
                            { field_label("Amount (₹)") }
                            <input type="number" step="0.01" value={(*v_amount).clone()} oninput={bind_input(v_amount.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                    </div>
                    <div class="space-y-1">
                        { field_label("Category") }
                        <select value={(*v_category).clone()} onchange={bind_select(v_category.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                            { category_options() }
                        </select>
                    </div>
                    <button onclick={on_save_verified}
                        class="w-full bg-indigo-600 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition">
                        {"Confirm & Save"}
                    </button>
                </div>
            }) }

            { modal_shell(edit.phase(), "Edit Transaction ✏️".to_string(), close_edit, html! {
                <div class="space-y-3">
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            { field_label("Date") }
                            <input type="date" value={(*e_date).clone()} oninput={bind_input(e_date.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                        <div class="space-y-1">
                            { field_label("Amount (₹)") }
                            <input type="number" step="0.01" value={(*e_amount).clone()} oninput={bind_input(e_amount.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                    </div>
                    <div class="space-y-1">
                        { field_label("Merchant") }
                        <input value={(*e_merchant).clone()} oninput={bind_input(e_merchant.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            { field_label("Category") }
                            <select value={(*e_category).clone()} onchange={bind_select(e_category.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                                { category_options() }
                            </select>
                        </div>
                        <div class="space-y-1">
                            { field_label("Type") }
                            <select value={(*e_kind).clone()} onchange={bind_select(e_kind.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                                <option value="Debit">{"Debit"}</option>
                                <option value="Credit">{"Credit"}</option>
                            </select>
                        </div>
                    </div>
                    <button onclick={on_save_edit}
                        class="w-full bg-indigo-600 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition">
                        {"Save Changes"}
                    </button>
                </div>
            }) }

            { modal_shell(
                budget_modal.phase(),
                if b_id.is_some() { "Edit Budget ✏️".to_string() } else { "New Budget 🎯".to_string() },
                close_budget,
                html! {
                <div class="space-y-3">
                    <div class="space-y-1">
                        { field_label("Category") }
                        <select value={(*b_category).clone()} onchange={bind_select(b_category.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none">
                            { category_options() }
                        </select>
                    </div>
                    <div class="space-y-1">
                        { field_label("Amount (₹)") }
                        <input type="number" step="0.01" value={(*b_amount).clone()} oninput={bind_input(b_amount.clone())}
                            placeholder="0.00" class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            { field_label("Start") }
                            <input type="date" value={(*b_start).clone()} oninput={bind_input(b_start.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                        <div class="space-y-1">
                            { field_label("End") }
                            <input type="date" value={(*b_end).clone()} oninput={bind_input(b_end.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                    </div>
                    <button onclick={on_save_budget}
                        class="w-full bg-indigo-600 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition">
                        {"Save Budget"}
                    </button>
                </div>
            }) }

            { modal_shell(profile_modal.phase(), "Your Profile 👤".to_string(), close_profile, html! {
                <div class="space-y-3">
                    <div class="space-y-1">
                        { field_label("Name") }
                        <input value={(*p_name).clone()} oninput={bind_input(p_name.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            { field_label("Age") }
                            <input type="number" value={(*p_age).clone()} oninput={bind_input(p_age.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                        <div class="space-y-1">
                            { field_label("Occupation") }
                            <input value={(*p_occupation).clone()} oninput={bind_input(p_occupation.clone())}
                                class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                        </div>
                    </div>
                    <div class="space-y-1">
                        { field_label("Role") }
                        <input value={(*p_role).clone()} oninput={bind_input(p_role.clone())}
                            class="w-full bg-slate-100 rounded-xl px-3 py-2 text-sm outline-none" />
                    </div>
                    <button onclick={on_save_profile}
                        class="w-full bg-indigo-600 text-white py-2.5 rounded-xl text-sm font-bold hover:opacity-90 transition">
                        {"Save Profile"}
                    </button>
                </div>
            }) }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! { <DashboardPage /> }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
