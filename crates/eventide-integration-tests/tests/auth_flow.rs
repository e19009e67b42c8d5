//! Registration, login, token verification, and role changes end to end.

use eventide_auth::{INVALID_CREDENTIALS, RegisterRequest};
use eventide_core::{Role, ServiceError};
use eventide_test::{TEST_PASSWORD, TestPlatform};

#[tokio::test]
async fn register_then_login_yields_user_token() {
    let platform = TestPlatform::new();

    let view = platform
        .registration
        .register(RegisterRequest::new("alice", TEST_PASSWORD, "alice@x.com"))
        .await
        .unwrap();
    assert_eq!(view.name, "alice");
    assert_eq!(view.email, "alice@x.com");

    let issued = platform.login.authenticate("alice", TEST_PASSWORD).await.unwrap();
    let claims = platform.issuer.verifier().claims(&issued.token).unwrap();

    assert_eq!(claims.sub, view.id.to_string());
    assert_eq!(claims.name, "alice");
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.iss, "AccountService");
    assert_eq!(claims.exp - claims.iat, 120 * 60);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let platform = TestPlatform::new();
    platform.register_and_login("alice").await.unwrap();

    let wrong = platform.login.authenticate("alice", "nope").await.unwrap_err();
    let unknown = platform.login.authenticate("mallory", TEST_PASSWORD).await.unwrap_err();

    let expected = ServiceError::Unauthorized(INVALID_CREDENTIALS.to_owned());
    assert_eq!(wrong, expected);
    assert_eq!(unknown, expected);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let platform = TestPlatform::new();
    platform.register_and_login("alice").await.unwrap();

    let err = platform
        .registration
        .register(RegisterRequest::new("alice", "other", "other@x.com"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::validation(["Username already exists"]));
}

#[tokio::test]
async fn blank_registration_reports_every_field() {
    let platform = TestPlatform::new();

    let err = platform
        .registration
        .register(RegisterRequest::new("", " ", ""))
        .await
        .unwrap_err();
    assert_eq!(
        err.violations(),
        [
            "Username is Null or Empty",
            "Password is Null or Empty",
            "Email is Null or Empty"
        ]
    );
}

#[tokio::test]
async fn promoted_user_gets_admin_token_on_next_login() {
    let platform = TestPlatform::new();
    let (_, admin) = platform.add_account("root", Role::Admin).await.unwrap();
    let (bob, before) = platform.register_and_login("bob").await.unwrap();
    assert_eq!(before.role, Role::User);

    let change = platform.accounts.set_role(&admin, "bob", "Admin").await.unwrap();
    assert_eq!(change.new_role, Role::Admin);

    let after = platform.login("bob").await.unwrap();
    assert_eq!(after.user_id, Some(bob.id));
    assert_eq!(after.role, Role::Admin);
}

#[tokio::test]
async fn non_admin_cannot_change_roles() {
    let platform = TestPlatform::new();
    let (_, bob) = platform.register_and_login("bob").await.unwrap();

    let err = platform.accounts.set_role(&bob, "bob", "Admin").await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn token_from_another_key_is_rejected() {
    let platform = TestPlatform::new();
    let other = TestPlatform::new();
    other.register_and_login("alice").await.unwrap();
    let issued = other.login.authenticate("alice", TEST_PASSWORD).await.unwrap();

    // Same key, so the other platform's token verifies here too.
    assert!(platform.issuer.verifier().verify(&issued.token).is_ok());

    let tampered = format!("{}x", issued.token);
    let err = platform.issuer.verifier().verify(&tampered).unwrap_err();
    assert_eq!(err, ServiceError::Unauthorized("Invalid token".to_owned()));
}
