//! Page components mounted into the outlet.
//!
//! Access control happens before any of these are mounted; pages only read
//! the session for display.

use leptos::*;

use forgepos_auth::Role;
use forgepos_core::StoreId;
use forgepos_router::{Command, ViewId, ViewRegistry, paths};

use crate::frontend::api;
use crate::frontend::app::AppContext;
use crate::types::LoginForm;

/// Component for every routable view.
pub fn registry() -> ViewRegistry<View> {
    ViewRegistry::new()
        .register(ViewId::Home, || view! { <HomePage/> }.into_view())
        .register(ViewId::Login, || view! { <LoginPage/> }.into_view())
        .register(ViewId::EmployeeDashboard, || {
            view! { <EmployeeDashboardPage/> }.into_view()
        })
        .register(ViewId::ManagerDashboard, || {
            view! { <ManagerDashboardPage/> }.into_view()
        })
        .register(ViewId::Products, || view! { <ProductsPage/> }.into_view())
        .register(ViewId::Orders, || view! { <OrdersPage/> }.into_view())
        .register(ViewId::ProductsRestock, || view! { <RestockPage/> }.into_view())
        .register(ViewId::NotFound, || view! { <NotFoundPage/> }.into_view())
}

fn store_label(ctx: &AppContext) -> String {
    ctx.session()
        .store_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let signed_in = ctx.session().is_authenticated();

    view! {
        <section class="home">
            <h1>"Welcome to the point-of-sale system"</h1>
            <p>"Manage products and sales, and follow your inventory in real time."</p>
            {(!signed_in).then(|| view! {
                <a href=paths::LOGIN class="login-button">"Sign in"</a>
                <p>"Please sign in to access the features."</p>
            })}
        </section>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let form = create_rw_signal(LoginForm::default());
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let request = match form.get_untracked().to_request() {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        loading.set(true);
        error.set(None);

        let ctx = ctx.clone();
        spawn_local(async move {
            let result = match api::login(ctx.config(), &request).await {
                Ok(response) => response.into_login_success(request.store_id),
                Err(err) => Err(err),
            };

            // A successful login unmounts this page, so its signals may be gone.
            match result {
                Ok(success) => {
                    if let Err(err) = ctx.dispatch(Command::LoginSuccess(success)) {
                        let _ = error.try_set(Some(err.to_string()));
                    }
                }
                Err(err) => {
                    tracing::info!(error = %err, "login failed");
                    let _ = error.try_set(Some(err.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    let is_employee = move || form.with(|f| f.role == Role::Employee);

    view! {
        <section class="login">
            <h2>"Sign in"</h2>
            <form on:submit=on_submit>
                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    prop:value=move || form.with(|f| f.username.clone())
                    prop:disabled=move || loading.get()
                    on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                />

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    prop:value=move || form.with(|f| f.password.clone())
                    prop:disabled=move || loading.get()
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />

                <fieldset class="role">
                    <label>
                        <input
                            type="radio"
                            name="role"
                            prop:checked=is_employee
                            on:change=move |_| form.update(|f| f.select_role(Role::Employee))
                        />
                        "Employee"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="role"
                            prop:checked=move || !is_employee()
                            on:change=move |_| form.update(|f| f.select_role(Role::Manager))
                        />
                        "Manager"
                    </label>
                </fieldset>

                {move || is_employee().then(|| view! {
                    <label for="storeId">"Store (1-5)"</label>
                    <select
                        id="storeId"
                        prop:disabled=move || loading.get()
                        on:change=move |ev| {
                            if let Ok(store_id) = event_target_value(&ev).parse::<i64>() {
                                form.update(|f| f.select_store(store_id));
                            }
                        }
                    >
                        {StoreId::retail_stores()
                            .map(|id| {
                                let value = i64::from(id.value());
                                view! {
                                    <option
                                        value=value.to_string()
                                        selected=move || form.with(|f| f.store_id == value)
                                    >
                                        {format!("Store {id}")}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                })}

                {move || error.get().map(|message| view! { <div class="error">{message}</div> })}

                <button type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </section>
    }
}

#[component]
pub fn EmployeeDashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = store_label(&ctx);

    let shortcuts = [
        (paths::PRODUCTS, "primary", ViewId::Products),
        (paths::ORDERS, "secondary", ViewId::Orders),
        (paths::PRODUCTS_RESTOCK, "warning", ViewId::ProductsRestock),
    ];

    view! {
        <section class="dashboard">
            <h2>"Employee dashboard"</h2>
            <p>{format!("Store {store}")}</p>
            <div class="button-grid">
                {shortcuts
                    .into_iter()
                    .map(|(path, class, view)| {
                        let ctx = ctx.clone();
                        view! {
                            <button class=class on:click=move |_| ctx.navigate(path)>
                                {view.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ManagerDashboardPage() -> impl IntoView {
    view! {
        <section class="dashboard">
            <h2>"Manager dashboard"</h2>
            <p>"Sales by store and remaining stock across the network."</p>
            <a href=paths::PRODUCTS>{ViewId::Products.title()}</a>
            <a href=paths::ORDERS>{ViewId::Orders.title()}</a>
        </section>
    }
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    view! {
        <section class="products">
            <h2>{ViewId::Products.title()}</h2>
            <p>{format!("Catalogue for store {}", store_label(&ctx))}</p>
        </section>
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    view! {
        <section class="orders">
            <h2>{ViewId::Orders.title()}</h2>
            <p>{format!("Orders for store {}", store_label(&ctx))}</p>
        </section>
    }
}

#[component]
pub fn RestockPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    view! {
        <section class="restock">
            <h2>{ViewId::ProductsRestock.title()}</h2>
            <p>{format!("Products to restock for store {}", store_label(&ctx))}</p>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h2>{ViewId::NotFound.title()}</h2>
            <a href=paths::HOME>{ViewId::Home.title()}</a>
        </section>
    }
}
