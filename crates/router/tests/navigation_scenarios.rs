use forgepos_auth::{
    InMemoryKeyValueStore, KeyValueSessionStore, KeyValueStore, Role, Session, SessionStore, keys,
};
use forgepos_router::{
    Command, GuardDecision, History, HistoryAction, InMemoryHistory, LoginSuccess,
    NavigationOrigin, NavigationRequest, Navigator, RouteTable, Shell, ViewId, decide, paths,
};

type TestShell = Shell<KeyValueSessionStore<InMemoryKeyValueStore>, InMemoryHistory>;

fn shell_at(path: &str) -> TestShell {
    forgepos_observability::init();
    Shell::new(Navigator::new(
        RouteTable::reference(),
        KeyValueSessionStore::new(InMemoryKeyValueStore::new()),
        InMemoryHistory::new(path),
    ))
}

/// Back/forward on the in-memory history, replayed through the shell.
fn back(shell: &mut TestShell) -> ViewId {
    shell
        .navigator_mut()
        .history_mut()
        .back()
        .expect("history has a previous entry");
    shell.on_pop_state().outlet.view
}

fn forward(shell: &mut TestShell) -> ViewId {
    shell
        .navigator_mut()
        .history_mut()
        .forward()
        .expect("history has a next entry");
    shell.on_pop_state().outlet.view
}

fn address_bar(shell: &TestShell) -> String {
    shell.navigator().history().current_path()
}

#[test]
fn anonymous_deep_link_to_protected_path_shows_login() {
    let mut shell = shell_at("/orders");
    let outcome = shell.start();

    assert_eq!(outcome.outlet.view, ViewId::Login);
    assert_eq!(address_bar(&shell), paths::LOGIN);
    assert_eq!(shell.navigator().history().len(), 1);
}

#[test]
fn manager_opens_manager_dashboard() {
    let mut shell = shell_at("/");
    shell.start();
    shell
        .navigator()
        .sessions()
        .establish(Role::Manager, None)
        .unwrap();

    let route = shell.navigator().routes().resolve(paths::MANAGER_DASHBOARD).unwrap();
    assert_eq!(
        decide(&shell.session(), route),
        GuardDecision::Allow(ViewId::ManagerDashboard)
    );

    let outcome = shell
        .dispatch(NavigationRequest::link(paths::MANAGER_DASHBOARD).into())
        .unwrap();
    assert_eq!(outcome.outlet.view, ViewId::ManagerDashboard);
    assert_eq!(address_bar(&shell), paths::MANAGER_DASHBOARD);
}

#[test]
fn employee_is_refused_manager_dashboard() {
    let mut shell = shell_at("/");
    shell.start();
    shell
        .navigator()
        .sessions()
        .establish(Role::Employee, Some(2))
        .unwrap();

    let route = shell.navigator().routes().resolve(paths::MANAGER_DASHBOARD).unwrap();
    assert_eq!(
        decide(&shell.session(), route),
        GuardDecision::Deny {
            redirect: paths::LOGIN.to_string()
        }
    );

    let outcome = shell
        .dispatch(NavigationRequest::link(paths::MANAGER_DASHBOARD).into())
        .unwrap();
    assert_eq!(outcome.outlet.view, ViewId::Login);
    assert_eq!(address_bar(&shell), paths::LOGIN);
}

#[test]
fn logout_revokes_access_to_orders() {
    let mut shell = shell_at("/");
    shell.start();
    shell.on_login_success(Role::Employee, Some(1)).unwrap();
    assert_eq!(
        shell.dispatch(NavigationRequest::link(paths::ORDERS).into()).unwrap().outlet.view,
        ViewId::Orders
    );

    let outcome = shell.on_logout();
    assert_eq!(outcome.outlet.view, ViewId::Home);
    assert_eq!(address_bar(&shell), paths::HOME);

    let outcome = shell
        .dispatch(NavigationRequest::link(paths::ORDERS).into())
        .unwrap();
    assert_eq!(outcome.outlet.view, ViewId::Login);
    assert_eq!(outcome.redirects.len(), 1);
}

#[test]
fn login_persists_session_before_landing_is_guarded() {
    let mut shell = shell_at("/login");
    shell.start();

    let outcome = shell
        .dispatch(Command::LoginSuccess(LoginSuccess {
            status: Role::Employee,
            store_id: Some(5),
        }))
        .unwrap();

    assert_eq!(outcome.outlet.view, ViewId::EmployeeDashboard);
    assert!(!outcome.was_redirected());
    assert_eq!(address_bar(&shell), paths::EMPLOYEE_DASHBOARD);

    let backend = shell.navigator().sessions().backend();
    assert_eq!(backend.get(keys::USER_STATUS).unwrap().as_deref(), Some("employee"));
    assert_eq!(backend.get(keys::STORE_ID).unwrap().as_deref(), Some("5"));
}

#[test]
fn session_survives_reload() {
    let store = std::rc::Rc::new(InMemoryKeyValueStore::new());

    let mut first = Shell::new(Navigator::new(
        RouteTable::reference(),
        KeyValueSessionStore::new(store.clone()),
        InMemoryHistory::new("/login"),
    ));
    first.start();
    first.on_login_success(Role::Manager, None).unwrap();

    // A reload builds a fresh shell over the same durable store.
    let mut reloaded = Shell::new(Navigator::new(
        RouteTable::reference(),
        KeyValueSessionStore::new(store),
        InMemoryHistory::new(paths::MANAGER_DASHBOARD),
    ));
    let outcome = reloaded.start();
    assert_eq!(outcome.outlet.view, ViewId::ManagerDashboard);
    assert_eq!(outcome.history, HistoryAction::None);
}

#[test]
fn back_and_forward_never_grow_history() {
    let mut shell = shell_at("/");
    shell.start();
    shell.on_login_success(Role::Employee, Some(3)).unwrap();
    shell.dispatch(NavigationRequest::link(paths::PRODUCTS).into()).unwrap();
    shell.dispatch(NavigationRequest::link(paths::ORDERS).into()).unwrap();

    let len = shell.navigator().history().len();
    assert_eq!(len, 4);

    assert_eq!(back(&mut shell), ViewId::Products);
    assert_eq!(back(&mut shell), ViewId::EmployeeDashboard);
    assert_eq!(forward(&mut shell), ViewId::Products);
    assert_eq!(back(&mut shell), ViewId::EmployeeDashboard);
    assert_eq!(back(&mut shell), ViewId::Home);

    assert_eq!(shell.navigator().history().len(), len);
}

#[test]
fn back_into_protected_page_after_logout_replaces_entry_with_login() {
    let mut shell = shell_at("/");
    shell.start();
    shell.on_login_success(Role::Employee, Some(2)).unwrap();
    shell.dispatch(NavigationRequest::link(paths::ORDERS).into()).unwrap();
    shell.on_logout();

    let len = shell.navigator().history().len();

    // Back lands on /orders, which is now refused.
    assert_eq!(back(&mut shell), ViewId::Login);
    assert_eq!(address_bar(&shell), paths::LOGIN);
    assert_eq!(shell.navigator().history().len(), len);
    assert_eq!(
        shell.navigator().history().entries(),
        ["/", "/employee-dashboard", "/login", "/"]
    );
}

#[test]
fn outlet_and_address_bar_always_agree() {
    let requests = [
        NavigationRequest::link("/orders"),
        NavigationRequest::link("/products-restock"),
        NavigationRequest::link("/nowhere"),
        NavigationRequest::new("/manager-dashboard", NavigationOrigin::ProgrammaticRedirect),
        NavigationRequest::link("/login"),
        NavigationRequest::link("/"),
    ];

    for role in [None, Some((Role::Employee, Some(4))), Some((Role::Manager, None))] {
        let mut shell = shell_at("/");
        shell.start();
        if let Some((role, store)) = role {
            shell.navigator().sessions().establish(role, store).unwrap();
        }

        for request in requests.iter().cloned() {
            let outcome = shell.dispatch(request.into()).unwrap();
            let resolved = shell
                .navigator()
                .routes()
                .resolve(&address_bar(&shell))
                .expect("address bar shows a known route");
            assert_eq!(resolved.view, outcome.outlet.view);
        }
    }
}

#[test]
fn corrupted_session_is_treated_as_anonymous() {
    let mut shell = shell_at("/");
    let backend = shell.navigator().sessions().backend();
    backend.set(keys::USER_STATUS, "superuser").unwrap();

    assert_eq!(shell.session(), Session::anonymous());
    let outcome = shell
        .dispatch(NavigationRequest::link(paths::MANAGER_DASHBOARD).into())
        .unwrap();
    assert_eq!(outcome.outlet.view, ViewId::Login);
}
