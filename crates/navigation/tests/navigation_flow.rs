//! End-to-end navigation flow against an in-memory identity SDK.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use taskflow_access::SessionUser;
use taskflow_navigation::{
    AppRoutes, ClientConfig, ClientError, ClientSlot, IdentitySdk, InitOutcome, Location,
    NavigationController, RouteGuard, SdkError,
};

struct MemorySdk {
    config: ClientConfig,
    session: RefCell<Option<SessionUser>>,
}

impl MemorySdk {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: RefCell::new(None),
        }
    }
}

impl IdentitySdk for MemorySdk {
    fn get_session(&self) -> Result<Option<SessionUser>, SdkError> {
        Ok(self.session.borrow().clone())
    }

    fn login(&self) -> Result<SessionUser, SdkError> {
        let user = SessionUser::new(json!({
            "emailAddress": "sam@example.com",
            "projectId": self.config.project_id,
        }));
        *self.session.borrow_mut() = Some(user.clone());
        Ok(user)
    }

    fn logout(&self) -> Result<(), SdkError> {
        self.session.borrow_mut().take();
        Ok(())
    }
}

fn config() -> ClientConfig {
    ClientConfig::from_lookup(|name| match name {
        "APPER_PROJECT_ID" => Some("proj-1".to_string()),
        "APPER_PUBLIC_KEY" => Some("pk-1".to_string()),
        _ => None,
    })
    .unwrap()
}

fn client(slot: &ClientSlot<MemorySdk>) -> Result<Rc<MemorySdk>, ClientError> {
    slot.get_or_init(|| Ok(MemorySdk::new(config())))
}

#[test]
fn deep_link_survives_sign_in() {
    let slot = ClientSlot::new();
    let mut controller = NavigationController::new(RouteGuard::builtin());

    // Anonymous deep link: guards are off until the session is known.
    let deep_link = Location::parse("/category/work?sort=due");
    assert_eq!(controller.on_navigation(&deep_link), None);

    let sdk = client(&slot);
    let outcome = controller.initialize(sdk.as_deref(), &deep_link);
    let login_url = match outcome {
        InitOutcome::Ready { navigate_to: Some(url) } => url,
        other => panic!("expected a redirect to login, got {other:?}"),
    };
    assert_eq!(login_url, "/login?redirect=%2Fcategory%2Fwork%3Fsort%3Ddue");

    // The guard agrees with the post-auth redirect.
    assert_eq!(controller.on_navigation(&deep_link).as_deref(), Some(login_url.as_str()));

    // The login page itself is public.
    let login_page = Location::parse(&login_url);
    assert_eq!(controller.on_navigation(&login_page), None);

    let sdk = client(&slot).expect("client constructed");
    let back = controller.login(sdk.as_ref(), &login_page).unwrap();
    assert_eq!(back.as_deref(), Some("/category/work?sort=due"));
    assert_eq!(controller.on_navigation(&Location::parse("/category/work?sort=due")), None);

    assert_eq!(controller.logout(sdk.as_ref()).as_deref(), Some("/login"));
    assert!(controller.on_navigation(&Location::parse("/today")).is_some());
}

#[test]
fn returning_user_lands_on_tasks() {
    let slot = ClientSlot::new();
    let sdk = client(&slot).unwrap();
    sdk.login().unwrap();

    let mut controller = NavigationController::new(RouteGuard::builtin());
    let outcome = controller.initialize(Ok(sdk.as_ref()), &Location::parse("/login"));
    assert_eq!(
        outcome,
        InitOutcome::Ready {
            navigate_to: Some("/".to_string())
        }
    );
    assert!(controller.auth().is_authenticated());

    let routes = AppRoutes::builtin(controller.guard().table());
    assert_eq!(routes.find("/").map(|r| r.title), Some("All Tasks"));
    assert_eq!(controller.on_navigation(&Location::parse("/")), None);
}

#[test]
fn missing_sdk_starts_signed_out_with_guards_enabled() {
    let slot: ClientSlot<MemorySdk> = ClientSlot::new();
    let mut controller = NavigationController::new(RouteGuard::builtin());

    let sdk = slot.get_or_init(|| Err(ClientError::SdkNotLoaded));
    assert_eq!(
        controller.initialize(sdk.as_deref(), &Location::parse("/today")),
        InitOutcome::SdkNotLoaded
    );
    assert!(controller.is_ready());
    assert!(!controller.auth().is_authenticated());
    assert_eq!(
        controller.on_navigation(&Location::parse("/today")).as_deref(),
        Some("/login?redirect=%2Ftoday")
    );
}

#[test]
fn client_construction_failure_leaves_app_waiting() {
    let slot: ClientSlot<MemorySdk> = ClientSlot::new();
    let mut controller = NavigationController::new(RouteGuard::builtin());

    let sdk = slot.get_or_init(|| Err(ClientError::Construction("bad key".into())));
    assert_eq!(
        controller.initialize(sdk.as_deref(), &Location::parse("/today")),
        InitOutcome::ClientUnavailable(ClientError::Construction("bad key".into()))
    );
    assert!(!controller.is_ready());
    assert_eq!(controller.on_navigation(&Location::parse("/today")), None);

    // Retry once a client can be built.
    let sdk = client(&slot);
    assert!(matches!(
        controller.initialize(sdk.as_deref(), &Location::parse("/today")),
        InitOutcome::Ready { .. }
    ));
    assert!(controller.is_ready());
}

#[test]
fn password_flows_with_extra_segments_are_not_guarded() {
    let mut controller = NavigationController::new(RouteGuard::builtin());
    controller.on_auth_success(None, &Location::parse("/login"));

    for path in [
        "/prompt-password/app1/sam@example.com/google",
        "/reset-password/app1/email",
        "/reset-password/app1",
    ] {
        assert_eq!(controller.on_navigation(&Location::parse(path)), None, "{path}");
    }
}
