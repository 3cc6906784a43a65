//! Dashboard: portfolio, risk analysis, alerts and rebalancing for the
//! current session. Demo sessions render fixtures through the same path.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use lib_api::Loadable;
use lib_core::{core_config, GuardianError, Notice, Notifier, Session};
use lib_session::{GateDecision, RestoreGate};
use shared::dto::{count_active_at_least, Alert, Portfolio, RebalanceSuggestion, RiskAnalysis, Severity};
use shared::utils::{format_percent, format_usd};

use crate::state::session::{use_session_context, SessionContext};
use crate::state::toasts::use_toasts;
use crate::utils::format::{drift_class, format_change, risk_band, severity_class};

#[derive(Clone, Copy)]
struct DashboardData {
    portfolio: RwSignal<Loadable<Portfolio>>,
    risk: RwSignal<Loadable<RiskAnalysis>>,
    alerts: RwSignal<Loadable<Vec<Alert>>>,
    rebalance: RwSignal<Loadable<RebalanceSuggestion>>,
    /// Bumped on every session change; responses for older values are dropped.
    generation: StoredValue<u64>,
}

impl DashboardData {
    fn new() -> Self {
        Self {
            portfolio: RwSignal::new(Loadable::new()),
            risk: RwSignal::new(Loadable::new()),
            alerts: RwSignal::new(Loadable::new()),
            rebalance: RwSignal::new(Loadable::new()),
            generation: StoredValue::new(0),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.update_value(|g| *g += 1);
        self.generation.get_value()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.try_get_value() == Some(generation)
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session_context();
    let notifier = use_toasts();
    let navigate = use_navigate();
    let data = DashboardData::new();

    // Restore gate: wait out the grace window before bouncing to the landing page.
    let gate = RestoreGate::from_config(core_config());
    let mounted_at = js_sys::Date::now();
    let grace_tick = RwSignal::new(0u32);
    leptos::task::spawn_local(async move {
        TimeoutFuture::new(gate.grace_ms()).await;
        let _ = grace_tick.try_update(|t| *t += 1);
    });

    let decision = Memo::new(move |_| {
        grace_tick.track();
        let elapsed = (js_sys::Date::now() - mounted_at).max(0.0) as u64;
        ctx.controller.with(|c| gate.decide(c.session(), c.is_restored(), elapsed))
    });

    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if decision.get() == GateDecision::RedirectToLanding {
                navigate("/", Default::default());
            }
        });
    }

    // Reload everything whenever the session changes.
    let session = Memo::new(move |_| ctx.session());
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let session = session.get();
            if !session.is_connected() {
                return;
            }
            let generation = data.next_generation();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Some(GuardianError::Unauthorized) = load_all(ctx, data, session, generation).await {
                    navigate("/", Default::default());
                }
            });
        });
    }

    let on_exit_demo = {
        let navigate = navigate.clone();
        move |_| {
            if ctx.disable_demo() {
                navigate("/", Default::default());
            }
        }
    };

    let on_reset_demo = {
        let navigate = navigate.clone();
        move |_| {
            if ctx.reset_demo() {
                navigate("/", Default::default());
            }
        }
    };

    let on_suggest = move |_| {
        let session = ctx.session_untracked();
        let generation = data.generation.get_value();
        data.rebalance.update(|r| r.begin());
        leptos::task::spawn_local(async move {
            let result = ctx.api().suggest_rebalance(&session).await;
            if data.is_current(generation) {
                let _ = data.rebalance.try_update(|r| r.finish(result, &notifier));
            }
        });
    };

    let on_execute = move |_: web_sys::MouseEvent| {
        let session = ctx.session_untracked();
        let Some(orders) = data.rebalance.with_untracked(|r| r.data.as_ref().map(|s| s.suggested_orders.clone())) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match ctx.api().execute_rebalance(&session, orders).await {
                Ok(execution) => notifier.notify(Notice::success(
                    "Rebalance submitted",
                    format!("{} Total cost {}.", execution.message, format_usd(execution.total_cost)),
                )),
                Err(err) => ctx.report(&err),
            }
        });
    };

    view! {
        {move || match decision.get() {
            GateDecision::Wait | GateDecision::RedirectToLanding => view! {
                <div class="page-center"><p class="muted">"Restoring session..."</p></div>
            }.into_any(),
            GateDecision::Allow => {
                let exit = on_exit_demo.clone();
                let reset = on_reset_demo.clone();
                view! {
                    <div class="dashboard">
                        <Show when=move || session.with(|s| s.is_demo())>
                            <div class="demo-banner">
                                <span>"You are viewing sample data."</span>
                                <button class="btn btn-secondary" on:click=exit.clone()>"Exit demo"</button>
                                <button class="btn btn-secondary" on:click=reset.clone()>"Reset demo"</button>
                            </div>
                        </Show>

                        <PortfolioPanel data=data/>
                        <RiskPanel data=data/>
                        <AlertsPanel data=data ctx=ctx/>

                        <div class="card">
                            <h2 class="card-title">"Rebalancing"</h2>
                            <button class="btn" on:click=on_suggest disabled=move || data.rebalance.with(|r| r.loading)>
                                "Suggest rebalance"
                            </button>
                            {move || data.rebalance.with(|r| r.data.clone()).map(|s| view! {
                                <RebalanceView suggestion=s can_execute=session.with(|s| s.can_sign() || s.is_demo()) on_execute=on_execute/>
                            })}
                        </div>
                    </div>
                }.into_any()
            }
        }}
    }
}

/// Fetch portfolio, risk and alerts for `session`. Returns the first
/// `Unauthorized` seen so the caller can leave the page.
async fn load_all(ctx: SessionContext, data: DashboardData, session: Session, generation: u64) -> Option<GuardianError> {
    let api = ctx.api();
    let notifier = ctx.controller.with_untracked(|c| *c.notifier());
    let mut unauthorized = None;

    let _ = data.portfolio.try_update(|p| p.begin());
    let _ = data.risk.try_update(|r| r.begin());
    let _ = data.alerts.try_update(|a| a.begin());

    let portfolio = api.get_portfolio(&session).await;
    if data.is_current(generation) {
        if let Some(err @ GuardianError::Unauthorized) = data.portfolio.try_update(|p| p.finish(portfolio, &notifier)).flatten() {
            unauthorized = Some(err);
        }
    }

    let risk = api.analyze_risk(&session).await;
    if data.is_current(generation) {
        if let Some(err @ GuardianError::Unauthorized) = data.risk.try_update(|r| r.finish(risk, &notifier)).flatten() {
            unauthorized = Some(err);
        }
    }

    let alerts = api.get_alerts(&session).await;
    if data.is_current(generation) {
        if let Some(err @ GuardianError::Unauthorized) = data.alerts.try_update(|a| a.finish(alerts, &notifier)).flatten() {
            unauthorized = Some(err);
        }
    }

    unauthorized
}

#[component]
fn PortfolioPanel(data: DashboardData) -> impl IntoView {
    view! {
        <div class="card">
            <h2 class="card-title">"Portfolio"</h2>
            {move || data.portfolio.with(|p| {
                if p.loading {
                    return view! { <p class="muted">"Loading portfolio..."</p> }.into_any();
                }
                let Some(portfolio) = p.data.clone() else {
                    return view! { <p class="muted">"No portfolio data yet."</p> }.into_any();
                };
                let (band, band_class) = risk_band(portfolio.risk_score);
                let rows = portfolio
                    .visible_assets()
                    .cloned()
                    .map(|asset| {
                        let drift = asset.current_allocation - asset.target_allocation;
                        view! {
                            <tr>
                                <td>{asset.asset_code}</td>
                                <td>{format!("{:.4}", asset.balance)}</td>
                                <td>{format_usd(asset.value_usd)}</td>
                                <td>{format_percent(asset.current_allocation)}</td>
                                <td>{format_percent(asset.target_allocation)}</td>
                                <td class=drift_class(drift)>{format_change(drift)}</td>
                            </tr>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="stat-row">
                        <div class="stat">
                            <span class="muted">"Total value"</span>
                            <strong>{format_usd(portfolio.total_value)}</strong>
                        </div>
                        <div class="stat">
                            <span class="muted">"Risk score"</span>
                            <strong class=band_class>{format!("{:.1} ({})", portfolio.risk_score, band)}</strong>
                        </div>
                    </div>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Asset"</th><th>"Balance"</th><th>"Value"</th>
                                <th>"Current"</th><th>"Target"</th><th>"Drift"</th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }.into_any()
            })}
        </div>
    }
}

#[component]
fn RiskPanel(data: DashboardData) -> impl IntoView {
    view! {
        <div class="card">
            <h2 class="card-title">"Risk analysis"</h2>
            {move || data.risk.with(|r| {
                if r.loading {
                    return view! { <p class="muted">"Analyzing..."</p> }.into_any();
                }
                let Some(risk) = r.data.clone() else {
                    return view! { <p class="muted">"No analysis available."</p> }.into_any();
                };
                let recommendations = risk
                    .recommendations
                    .iter()
                    .map(|rec| view! { <li>{rec.summary().to_string()}</li> })
                    .collect_view();
                view! {
                    <div class="stat-row">
                        <div class="stat"><span class="muted">"VaR 95%"</span><strong>{format_usd(risk.var_95)}</strong></div>
                        <div class="stat"><span class="muted">"VaR 99%"</span><strong>{format_usd(risk.var_99)}</strong></div>
                        <div class="stat"><span class="muted">"Volatility"</span><strong>{format_percent(risk.volatility)}</strong></div>
                        <div class="stat"><span class="muted">"Sharpe"</span><strong>{format!("{:.2}", risk.sharpe_ratio)}</strong></div>
                        <div class="stat"><span class="muted">"Max drawdown"</span><strong>{format_percent(risk.max_drawdown)}</strong></div>
                    </div>
                    <ul class="recommendations">{recommendations}</ul>
                }.into_any()
            })}
        </div>
    }
}

#[component]
fn AlertsPanel(data: DashboardData, ctx: SessionContext) -> impl IntoView {
    let notifier = use_toasts();

    let act = move |alert_id: i64, delete: bool| {
        let session = ctx.session_untracked();
        leptos::task::spawn_local(async move {
            let api = ctx.api();
            let result = if delete {
                api.delete_alert(&session, alert_id).await
            } else {
                api.resolve_alert(&session, alert_id).await
            };
            match result {
                Ok(ack) => {
                    notifier.notify(Notice::success(if delete { "Alert deleted" } else { "Alert resolved" }, ack.message));
                    let _ = data.alerts.try_update(|a| {
                        if let Some(list) = a.data.as_mut() {
                            if delete {
                                list.retain(|alert| alert.id != alert_id);
                            } else if let Some(alert) = list.iter_mut().find(|alert| alert.id == alert_id) {
                                alert.is_active = false;
                            }
                        }
                    });
                }
                Err(err) => ctx.report(&err),
            }
        });
    };

    view! {
        <div class="card">
            <h2 class="card-title">
                "Alerts "
                {move || data.alerts.with(|a| {
                    a.data.as_deref().map(|list| {
                        let urgent = count_active_at_least(list, Severity::High);
                        (urgent > 0).then(|| view! { <span class="badge severity-high">{format!("{} urgent", urgent)}</span> })
                    })
                })}
            </h2>
            {move || data.alerts.with(|a| {
                if a.loading {
                    return view! { <p class="muted">"Loading alerts..."</p> }.into_any();
                }
                let list = a.data.clone().unwrap_or_default();
                if list.is_empty() {
                    return view! { <p class="muted">"No alerts."</p> }.into_any();
                }
                list.into_iter()
                    .map(|alert| {
                        let id = alert.id;
                        let active = alert.is_active;
                        let triggered = alert.triggered_at.format("%Y-%m-%d %H:%M").to_string();
                        view! {
                            <div class=format!("alert-row {}", severity_class(alert.severity))>
                                <div>
                                    <strong>{alert.alert_type}</strong>
                                    <p>{alert.message}</p>
                                    <span class="muted">{triggered}</span>
                                </div>
                                <div class="alert-actions">
                                    <Show when=move || active>
                                        <button class="btn btn-secondary" on:click=move |_| act(id, false)>"Resolve"</button>
                                    </Show>
                                    <button class="btn btn-danger" on:click=move |_| act(id, true)>"Delete"</button>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            })}
        </div>
    }
}

#[component]
fn RebalanceView<F>(suggestion: RebalanceSuggestion, can_execute: bool, on_execute: F) -> impl IntoView
where
    F: Fn(web_sys::MouseEvent) + Clone + Send + Sync + 'static,
{
    if !suggestion.should_rebalance {
        return view! { <p class="muted">"Portfolio is within its target allocation."</p> }.into_any();
    }

    let orders = suggestion
        .suggested_orders
        .iter()
        .map(|order| {
            view! {
                <tr>
                    <td>{order.asset_code.clone()}</td>
                    <td>{format!("{:?}", order.order_type)}</td>
                    <td>{format_usd(order.value_difference.abs())}</td>
                    <td>{format!("{} -> {}", format_percent(order.current_allocation), format_percent(order.target_allocation))}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="table">
            <thead><tr><th>"Asset"</th><th>"Side"</th><th>"Amount"</th><th>"Allocation"</th></tr></thead>
            <tbody>{orders}</tbody>
        </table>
        <p class="muted">
            {format!(
                "Estimated cost {}, risk improvement {}",
                format_usd(suggestion.estimated_cost),
                format_percent(suggestion.risk_improvement),
            )}
        </p>
        <Show
            when=move || can_execute
            fallback=|| view! { <p class="muted">"Connect a signing wallet to execute."</p> }
        >
            <button class="btn" on:click=on_execute.clone()>"Execute"</button>
        </Show>
    }
    .into_any()
}
