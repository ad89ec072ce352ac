mod common;

use account_service::account::errors::AccountError;
use account_service::account::models::EmailAddress;
use account_service::account::models::RegisterAccountCommand;
use account_service::account::ports::AccountServicePort;
use account_service::organization::models::Membership;
use account_service::organization::models::Organization;
use account_service::organization::models::OrganizationId;
use common::StaticDirectory;
use common::TestApp;

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw.to_string()).unwrap()
}

async fn register(app: &TestApp, raw_email: &str, password: &str) -> account_service::account::models::Account {
    app.service
        .register(RegisterAccountCommand::new(
            email(raw_email),
            password.to_string(),
        ))
        .await
        .expect("registration failed")
}

#[tokio::test]
async fn email_verification_journey() {
    let app = TestApp::spawn();
    let account = register(&app, "alice@example.com", "pass_word1").await;
    assert!(!account.email_verified);

    // Request the verification email and consume the emailed token
    let dispatch = app
        .service
        .send_verification_email("alice@example.com", false)
        .await
        .unwrap();
    assert!(dispatch.email_sent);

    let token = app.last_emailed_token();
    let verified = app.service.verify_email(&token).await.unwrap();
    assert!(verified.email_verified);
    assert!(verified.email_verification_token.is_none());

    // The token is single-use
    let replay = app.service.verify_email(&token).await;
    assert!(matches!(replay.unwrap_err(), AccountError::InvalidToken));

    // Issuing again is refused now that the email is verified
    let again = app
        .service
        .send_verification_email("alice@example.com", false)
        .await;
    assert!(matches!(
        again.unwrap_err(),
        AccountError::EmailAlreadyVerified
    ));
}

#[tokio::test]
async fn verification_email_resend_is_suppressed_while_token_is_fresh() {
    let app = TestApp::spawn();
    register(&app, "alice@example.com", "pass_word1").await;

    let first = app
        .service
        .send_verification_email("alice@example.com", true)
        .await
        .unwrap();
    assert!(first.email_sent);

    // Second request inside the window sends nothing
    let second = app
        .service
        .send_verification_email("alice@example.com", true)
        .await
        .unwrap();
    assert!(!second.email_sent);
    assert_eq!(app.mailer.sent().len(), 1);

    // Without the flag a fresh token is always issued
    let first_token = app.last_emailed_token();
    let third = app
        .service
        .send_verification_email("alice@example.com", false)
        .await
        .unwrap();
    assert!(third.email_sent);
    assert_eq!(app.mailer.sent().len(), 2);

    // The superseded token no longer matches anything
    let result = app.service.verify_email(&first_token).await;
    assert!(matches!(result.unwrap_err(), AccountError::InvalidToken));
}

#[tokio::test]
async fn magic_link_journey() {
    let app = TestApp::spawn();
    let account = register(&app, "alice@example.com", "pass_word1").await;
    assert_eq!(account.sign_in_count, 0);

    let dispatch = app
        .service
        .send_magic_link("alice@example.com", false)
        .await
        .unwrap();
    assert!(dispatch.email_sent);

    let token = app.last_emailed_token();
    let signed_in = app
        .service
        .authenticate_with_magic_link(&token)
        .await
        .unwrap();
    assert_eq!(signed_in.sign_in_count, 1);
    assert!(signed_in.magic_link_token.is_none());

    // Consumed links cannot be replayed
    let replay = app.service.authenticate_with_magic_link(&token).await;
    assert!(matches!(
        replay.unwrap_err(),
        AccountError::InvalidMagicLink
    ));
}

#[tokio::test]
async fn password_reset_journey() {
    let app = TestApp::spawn();
    register(&app, "alice@example.com", "old_pass_1").await;

    // A request for an unknown email looks exactly like success
    let unknown = app
        .service
        .send_password_reset_email("ghost@example.com", false)
        .await
        .unwrap();
    assert!(!unknown.email_sent);
    assert!(app.mailer.sent().is_empty());

    let dispatch = app
        .service
        .send_password_reset_email("alice@example.com", false)
        .await
        .unwrap();
    assert!(dispatch.email_sent);

    let token = app.last_emailed_token();
    let account = app
        .service
        .reset_password(&token, "new_pass_1")
        .await
        .unwrap();
    assert!(account.password_reset_token.is_none());

    // Old password is gone, new one works
    let old = app.service.authenticate("alice@example.com", "old_pass_1").await;
    assert!(matches!(old.unwrap_err(), AccountError::InvalidCredentials));
    app.service
        .authenticate("alice@example.com", "new_pass_1")
        .await
        .expect("new password rejected");

    // The reset token is single-use
    let replay = app.service.reset_password(&token, "other_pass_1").await;
    assert!(matches!(replay.unwrap_err(), AccountError::InvalidToken));
}

#[tokio::test]
async fn official_contact_email_journey() {
    let directory = StaticDirectory::new().with_contact("0123456A", "contact@example.org");
    let app = TestApp::spawn_with_directory(directory);

    let account = register(&app, "admin@example.com", "pass_word1").await;

    let organization_id = OrganizationId::new();
    app.organizations.insert_organization(Organization {
        id: organization_id,
        code: "0123456A".to_string(),
        name: "Example Org".to_string(),
    });
    app.organizations.insert_membership(Membership {
        organization_id,
        account_id: account.id,
        contact_email_verification_needed: true,
    });

    let dispatch = app
        .service
        .send_contact_email_verification(&account.id, &organization_id, false)
        .await
        .unwrap();
    assert!(dispatch.email_sent);

    // The email goes to the official contact, not the requesting account
    let messages = app.mailer.sent();
    assert_eq!(messages.last().unwrap().to[0].as_str(), "contact@example.org");

    let token = app.last_emailed_token();
    let confirmed = app
        .service
        .confirm_contact_email(&token, &organization_id)
        .await
        .unwrap();
    assert!(confirmed.contact_email_verification_token.is_none());

    let membership = app
        .organizations
        .membership(&organization_id, &account.id)
        .unwrap();
    assert!(!membership.contact_email_verification_needed);

    // With the flag cleared, another request is refused
    let again = app
        .service
        .send_contact_email_verification(&account.id, &organization_id, false)
        .await;
    assert!(matches!(
        again.unwrap_err(),
        AccountError::VerificationNotNeeded
    ));
}

#[tokio::test]
async fn contact_verification_surfaces_directory_failures() {
    // Directory knows no codes at all
    let app = TestApp::spawn();

    let account = register(&app, "admin@example.com", "pass_word1").await;

    let organization_id = OrganizationId::new();
    app.organizations.insert_organization(Organization {
        id: organization_id,
        code: "0123456A".to_string(),
        name: "Example Org".to_string(),
    });
    app.organizations.insert_membership(Membership {
        organization_id,
        account_id: account.id,
        contact_email_verification_needed: true,
    });

    let result = app
        .service
        .send_contact_email_verification(&account.id, &organization_id, false)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        AccountError::DirectoryLookupFailed(_)
    ));
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_refused() {
    let app = TestApp::spawn();
    register(&app, "alice@example.com", "pass_word1").await;

    let result = app
        .service
        .register(RegisterAccountCommand::new(
            email("alice@example.com"),
            "another_pass1".to_string(),
        ))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        AccountError::EmailUnavailable(_)
    ));
}
