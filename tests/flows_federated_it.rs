mod common;

// std
use std::{
	sync::{Arc, atomic::Ordering},
	time::Duration,
};
// self
use campaign_pulse::{
	auth::{AuthPhase, IdentityProvider},
	error::AuthError,
	flows::{AuthController, LoginOutcome},
	identity::IdentityProviderDescriptor,
	store::{MemoryBackend, SessionBackend, SessionStore},
	transport::{
		PENDING_KEY, PopupEvent, PopupPayload, PopupTransport, RedirectTransport,
		popup_payload_for_fragment,
	},
};
use common::{APP_ORIGIN, FakePage, ScriptedPopups};

fn success(origin: &str, url: &url::Url) -> PopupEvent {
	PopupEvent::Message {
		origin: origin.into(),
		payload: popup_payload_for_fragment(&common::callback_fragment(url))
			.expect("Callback fragment should produce a payload."),
	}
}

fn popup_controller(backend: &MemoryBackend, popups: Arc<ScriptedPopups>) -> AuthController {
	common::controller(backend, Arc::new(PopupTransport::new(popups, &common::app_origin())))
}

#[tokio::test]
async fn popup_login_authenticates_with_the_token_claims() {
	let backend = MemoryBackend::default();
	let popups = Arc::new(ScriptedPopups::new(|url| vec![success(APP_ORIGIN, url)]));
	let controller = popup_controller(&backend, popups.clone());

	controller.restore();

	let outcome = controller
		.login_with_federated_provider()
		.await
		.expect("Popup login should succeed.");
	let LoginOutcome::Authenticated(user) = outcome else {
		panic!("Popup login should authenticate immediately.");
	};

	assert_eq!(&*user.id, "1078");
	assert_eq!(user.email, "jane@x.com");
	assert_eq!(user.name, "Jane Doe");
	assert_eq!(user.provider, Some(IdentityProvider::Google));
	assert!(popups.closed.load(Ordering::SeqCst));
	assert_eq!(
		SessionStore::new(Arc::new(backend.clone()))
			.load()
			.expect("Memory backend reads should succeed."),
		Some(user)
	);

	let opened = popups.opened.lock().expect("Opened list lock should not be poisoned.");

	assert_eq!(common::query_param(&opened[0], "client_id").as_deref(), Some(common::CLIENT_ID));
	assert_eq!(
		common::query_param(&opened[0], "redirect_uri").as_deref(),
		Some("http://localhost:3000/authentication/sign-in")
	);
}

#[tokio::test]
async fn popup_messages_from_foreign_origins_are_ignored() {
	let backend = MemoryBackend::default();
	let popups = Arc::new(ScriptedPopups::new(|url| {
		vec![success("https://evil.example", url), success(APP_ORIGIN, url)]
	}));
	let controller = popup_controller(&backend, popups);

	controller.restore();

	let outcome = controller
		.login_with_federated_provider()
		.await
		.expect("The app-origin message should complete the login.");

	assert!(matches!(outcome, LoginOutcome::Authenticated(_)));
}

#[tokio::test]
async fn blocked_closed_and_rejected_popups_fail_with_distinct_reasons() {
	let cases: [(ScriptedPopups, &str); 3] = [
		(ScriptedPopups::blocked(), "popup_blocked"),
		(ScriptedPopups::new(|_| vec![PopupEvent::Closed]), "cancelled"),
		(
			ScriptedPopups::new(|_| {
				vec![PopupEvent::Message {
					origin: APP_ORIGIN.into(),
					payload: PopupPayload::Error { error: "access_denied".into() },
				}]
			}),
			"provider_error",
		),
	];

	for (popups, reason) in cases {
		let backend = MemoryBackend::default();
		let controller = popup_controller(&backend, Arc::new(popups));

		controller.restore();

		let err = controller
			.login_with_federated_provider()
			.await
			.expect_err("The popup login should fail.");

		assert_eq!(err.reason(), reason);
		assert_eq!(controller.phase(), AuthPhase::Anonymous);
	}
}

#[tokio::test(start_paused = true)]
async fn silent_popup_times_out() {
	let backend = MemoryBackend::default();
	let popups = Arc::new(ScriptedPopups::new(|_| Vec::new()));
	let transport = PopupTransport::new(popups.clone(), &common::app_origin())
		.with_timeout(Duration::from_secs(30));
	let controller = common::controller(&backend, Arc::new(transport));

	controller.restore();

	let err = controller
		.login_with_federated_provider()
		.await
		.expect_err("A silent popup should time out.");

	assert!(matches!(err, AuthError::Timeout));
	assert!(popups.closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn mismatched_state_is_rejected() {
	let backend = MemoryBackend::default();
	let popups = Arc::new(ScriptedPopups::new(|url| {
		let fragment = common::callback_fragment(url);
		let state = common::query_param(url, "state").expect("Authorize URL should carry a state.");

		vec![PopupEvent::Message {
			origin: APP_ORIGIN.into(),
			payload: PopupPayload::Success {
				fragment: fragment.replace(&format!("state={state}"), "state=xyz"),
			},
		}]
	}));
	let controller = popup_controller(&backend, popups);

	controller.restore();

	let err = controller
		.login_with_federated_provider()
		.await
		.expect_err("A foreign state should be rejected.");

	assert!(matches!(err, AuthError::StateMismatch));
	assert!(!controller.session().is_authenticated);
	assert!(backend.is_empty());
}

#[tokio::test]
async fn missing_client_id_is_reported_as_not_configured() {
	let backend = MemoryBackend::default();
	let popups = Arc::new(ScriptedPopups::new(|url| vec![success(APP_ORIGIN, url)]));
	let controller = AuthController::new(
		SessionStore::new(Arc::new(backend.clone())),
		Arc::new(PopupTransport::new(popups.clone(), &common::app_origin())),
		IdentityProviderDescriptor::google().expect("Google descriptor should build."),
		common::config().resolve_redirect_uri().expect("Redirect URI fixture should resolve."),
	);

	controller.restore();

	let err = controller
		.login_with_federated_provider()
		.await
		.expect_err("Federated login needs a client id.");

	assert_eq!(err.reason(), "not_configured");
	assert!(popups.opened.lock().expect("Opened list lock should not be poisoned.").is_empty());
}

#[tokio::test]
async fn redirect_login_completes_on_the_return_load() {
	let backend = MemoryBackend::default();
	let page = Arc::new(FakePage::default());
	let transport = Arc::new(RedirectTransport::new(page.clone(), Arc::new(backend.clone())));
	let controller = common::controller(&backend, transport.clone());

	controller.restore();

	let outcome = controller
		.login_with_federated_provider()
		.await
		.expect("Starting a redirect login should succeed.");

	assert_eq!(outcome, LoginOutcome::Redirecting);
	assert!(!controller.session().is_authenticated);

	let authorize_url = page.last_navigation().expect("The page should navigate to the provider.");

	page.land_on(common::callback_fragment(&authorize_url));

	let returned = common::controller(&backend, transport);
	let session = returned.restore();

	assert!(session.is_authenticated);
	assert_eq!(session.user.map(|user| user.email), Some("jane@x.com".into()));
	assert!(page.scrubbed.load(Ordering::SeqCst));
	assert!(page.fragment.lock().expect("Fragment lock should not be poisoned.").is_none());
	assert!(returned.take_redirect_error().is_none());
	assert_eq!(backend.read(PENDING_KEY).expect("Memory backend reads should succeed."), None);
}

#[test]
fn redirect_callback_without_a_pending_request_is_a_state_mismatch() {
	let backend = MemoryBackend::default();
	let page = Arc::new(FakePage::default());

	page.land_on(format!(
		"state=abc&id_token={}",
		common::id_token(common::jane_claims("n-abc"))
	));

	let controller = common::controller(
		&backend,
		Arc::new(RedirectTransport::new(page.clone(), Arc::new(backend.clone()))),
	);
	let session = controller.restore();

	assert!(!session.loading);
	assert!(!session.is_authenticated);
	assert!(matches!(controller.take_redirect_error(), Some(AuthError::StateMismatch)));
	assert!(controller.take_redirect_error().is_none());
	assert!(page.scrubbed.load(Ordering::SeqCst));
}
